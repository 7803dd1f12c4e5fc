//! Request processing: `send_tweet` and the fetch surface

use serde::Serialize;

use super::errors::ProgramResult;
use super::instruction::{SendTweet, SignedRequest};
use crate::clock::Clock;
use crate::identity::Identity;
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::record::Tweet;
use crate::store::{Memcmp, RecordStore, SlotAddress, SlotBackend};
use crate::validator::MutationValidator;

/// A tweet together with the address of its slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyedTweet {
    pub address: SlotAddress,
    #[serde(flatten)]
    pub tweet: Tweet,
}

/// The tweet program.
///
/// Owns the store handle; every mutation goes through [`Self::send_tweet`].
pub struct TweetProgram<B: SlotBackend, C: Clock> {
    store: RecordStore<B>,
    validator: MutationValidator,
    clock: C,
    metrics: MetricsRegistry,
}

impl<B: SlotBackend, C: Clock> TweetProgram<B, C> {
    pub fn new(store: RecordStore<B>, validator: MutationValidator, clock: C) -> Self {
        Self {
            store,
            validator,
            clock,
            metrics: MetricsRegistry::new(),
        }
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Validates a signed `send_tweet` request and writes the tweet into the
    /// fresh slot it names.
    ///
    /// The stored author is the request's author account and the timestamp
    /// is the clock reading at processing time. On any error nothing is
    /// written and the payer is not charged.
    pub fn send_tweet(&mut self, request: &SignedRequest) -> ProgramResult<SlotAddress> {
        let result = self.process_send_tweet(request);

        let tweet = request.accounts.tweet.to_hex();
        let author = request.accounts.author.to_hex();
        match &result {
            Ok(_) => {
                self.metrics.increment_tweets_sent();
                self.metrics.record_allocation(self.store.slot_rent());
                log_event_with_fields(
                    Event::TweetSent,
                    &[("address", tweet.as_str()), ("author", author.as_str())],
                );
            }
            Err(err) => {
                self.metrics.increment_tweets_rejected();
                log_event_with_fields(
                    Event::TweetRejected,
                    &[
                        ("address", tweet.as_str()),
                        ("author", author.as_str()),
                        ("code", err.code()),
                        ("message", err.message()),
                    ],
                );
            }
        }

        result
    }

    fn process_send_tweet(&mut self, request: &SignedRequest) -> ProgramResult<SlotAddress> {
        let args = SendTweet::unpack(&request.data)?;
        let accounts = request.accounts;

        let message = request.message_bytes();
        let proof = request.proof(&message);

        // the fresh slot must be claimed by its own key
        self.validator.authorize(&accounts.tweet, &proof)?;
        let tweet = self.validator.validate_and_author(
            &args.topic,
            &args.content,
            &accounts.author,
            &proof,
            &self.clock,
        )?;

        Ok(self.store.create(accounts.tweet, &tweet, &accounts.author)?)
    }

    /// Reads the tweet at `address`.
    pub fn fetch_one(&self, address: &SlotAddress) -> ProgramResult<Tweet> {
        Ok(self.store.get(address)?)
    }

    /// Every tweet in the store.
    pub fn fetch_all(&self) -> ProgramResult<Vec<KeyedTweet>> {
        self.fetch_matching(Vec::new())
    }

    /// Tweets holding `bytes` at byte `offset` of their slot.
    pub fn fetch_filtered(&self, offset: usize, bytes: &[u8]) -> ProgramResult<Vec<KeyedTweet>> {
        self.fetch_matching(vec![Memcmp::new(offset, bytes)])
    }

    /// Tweets written by `author`.
    pub fn fetch_by_author(&self, author: &Identity) -> ProgramResult<Vec<KeyedTweet>> {
        self.fetch_matching(vec![Memcmp::author(author)])
    }

    /// Tweets whose topic is exactly `topic`.
    pub fn fetch_by_topic(&self, topic: &str) -> ProgramResult<Vec<KeyedTweet>> {
        self.fetch_matching(vec![Memcmp::topic(topic)])
    }

    /// Tweets matching every filter; the first undecodable tweet slot
    /// aborts the scan.
    pub fn fetch_matching(&self, filters: Vec<Memcmp>) -> ProgramResult<Vec<KeyedTweet>> {
        let filter_count = filters.len().to_string();
        let tweets = self
            .store
            .query(filters)
            .map(|item| item.map(|(address, tweet)| KeyedTweet { address, tweet }))
            .collect::<Result<Vec<_>, _>>()?;

        self.metrics.record_scan(tweets.len() as u64);
        let matched = tweets.len().to_string();
        log_event_with_fields(
            Event::ScanComplete,
            &[("filters", filter_count.as_str()), ("matched", matched.as_str())],
        );
        Ok(tweets)
    }

    /// Credits `lamports` to `to`, returning the new balance.
    pub fn airdrop(&mut self, to: &Identity, lamports: u64) -> ProgramResult<u64> {
        let balance = self.store.bank_mut().credit(to, lamports)?;
        let (after, amount, recipient) = (balance.to_string(), lamports.to_string(), to.to_hex());
        log_event_with_fields(
            Event::Airdrop,
            &[
                ("balance", after.as_str()),
                ("lamports", amount.as_str()),
                ("to", recipient.as_str()),
            ],
        );
        Ok(balance)
    }

    /// Lamport balance of `owner`
    pub fn balance(&self, owner: &Identity) -> u64 {
        self.store.bank().balance(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::identity::Keypair;
    use crate::program::{ErrorKind, SendTweetAccounts};
    use crate::store::{Bank, MemoryBackend, Rent};
    use crate::validator::LengthUnit;

    const FUNDS: u64 = 1_000_000_000;

    fn program() -> TweetProgram<MemoryBackend, FixedClock> {
        let store = RecordStore::new(MemoryBackend::new(), Bank::new(), Rent::default());
        TweetProgram::new(
            store,
            MutationValidator::new(LengthUnit::Chars),
            FixedClock(1_650_000_000),
        )
    }

    fn request(author: &Keypair, tweet: &Keypair, topic: &str, content: &str) -> SignedRequest {
        let accounts = SendTweetAccounts {
            tweet: tweet.identity(),
            author: author.identity(),
        };
        SignedRequest::sign(accounts, &SendTweet::new(topic, content), &[author, tweet])
    }

    #[test]
    fn test_send_and_fetch() {
        let mut program = program();
        let author = Keypair::generate();
        let tweet = Keypair::generate();
        program.airdrop(&author.identity(), FUNDS).unwrap();

        let address = program
            .send_tweet(&request(&author, &tweet, "SheFi", "I am a SheFi Scholar"))
            .unwrap();
        assert_eq!(address, tweet.identity());

        let stored = program.fetch_one(&address).unwrap();
        assert_eq!(stored.author, author.identity());
        assert_eq!(stored.timestamp, 1_650_000_000);
        assert_eq!(stored.topic, "SheFi");

        let snapshot = program.metrics().snapshot();
        assert_eq!(snapshot.tweets_sent, 1);
        assert_eq!(snapshot.lamports_debited, program.store().slot_rent());
        assert_eq!(program.balance(&author.identity()), FUNDS - program.store().slot_rent());
    }

    #[test]
    fn test_rejected_request_writes_nothing() {
        let mut program = program();
        let author = Keypair::generate();
        program.airdrop(&author.identity(), FUNDS).unwrap();

        let err = program
            .send_tweet(&request(&author, &Keypair::generate(), &"x".repeat(51), "c"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TopicTooLong);
        assert_eq!(program.fetch_all().unwrap().len(), 0);
        assert_eq!(program.balance(&author.identity()), FUNDS);
        assert_eq!(program.metrics().snapshot().tweets_rejected, 1);
    }

    #[test]
    fn test_tweet_key_must_sign() {
        let mut program = program();
        let author = Keypair::generate();
        let tweet = Keypair::generate();
        program.airdrop(&author.identity(), FUNDS).unwrap();

        let accounts = SendTweetAccounts {
            tweet: tweet.identity(),
            author: author.identity(),
        };
        let unsigned = SignedRequest::sign(accounts, &SendTweet::new("t", "c"), &[&author]);
        let err = program.send_tweet(&unsigned).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_unfunded_author_fails_allocation() {
        let mut program = program();
        let err = program
            .send_tweet(&request(&Keypair::generate(), &Keypair::generate(), "t", "c"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AllocationFailed);
    }

    #[test]
    fn test_fetch_filtered_raw_offset() {
        let mut program = program();
        let author = Keypair::generate();
        program.airdrop(&author.identity(), FUNDS).unwrap();
        program
            .send_tweet(&request(&author, &Keypair::generate(), "SheFi", "a"))
            .unwrap();
        program
            .send_tweet(&request(&author, &Keypair::generate(), "veganism", "b"))
            .unwrap();

        assert_eq!(program.fetch_filtered(52, b"She").unwrap().len(), 1);
        assert_eq!(program.fetch_filtered(8, author.identity().as_bytes()).unwrap().len(), 2);
        assert_eq!(program.fetch_by_topic("veganism").unwrap()[0].tweet.content, "b");
        assert_eq!(program.metrics().snapshot().scans_executed, 3);
    }

    #[test]
    fn test_keyed_tweet_serializes_flat() {
        let keyed = KeyedTweet {
            address: Identity::new([1u8; 32]),
            tweet: Tweet::new(Identity::new([2u8; 32]), 7, "t", "c"),
        };
        let json = serde_json::to_value(&keyed).unwrap();
        assert_eq!(json["address"], "01".repeat(32));
        assert_eq!(json["topic"], "t");
        assert_eq!(json["timestamp"], 7);
    }
}
