//! End-to-end tweet scenarios
//!
//! Drives `TweetProgram` the way a client would: signed `send_tweet`
//! requests in, fetches and filtered scans out.

use tweetstore::clock::FixedClock;
use tweetstore::identity::{Identity, Keypair};
use tweetstore::program::{
    ErrorKind, SendTweet, SendTweetAccounts, SignedRequest, TweetProgram,
};
use tweetstore::record::{Field, Tweet};
use tweetstore::store::{Bank, Memcmp, MemoryBackend, RecordStore, Rent};
use tweetstore::validator::{LengthUnit, MutationValidator};

// =============================================================================
// Test Utilities
// =============================================================================

const NOW: i64 = 1_650_000_000;
const FUNDS: u64 = 10_000_000_000;

type Program = TweetProgram<MemoryBackend, FixedClock>;

fn create_program() -> Program {
    let store = RecordStore::new(MemoryBackend::new(), Bank::new(), Rent::default());
    TweetProgram::new(store, MutationValidator::new(LengthUnit::Chars), FixedClock(NOW))
}

fn funded_author(program: &mut Program) -> Keypair {
    let author = Keypair::generate();
    program.airdrop(&author.identity(), FUNDS).unwrap();
    author
}

/// Signs with the author and a fresh tweet key, returning the request
fn send_request(author: &Keypair, topic: &str, content: &str) -> SignedRequest {
    let tweet = Keypair::generate();
    let accounts = SendTweetAccounts {
        tweet: tweet.identity(),
        author: author.identity(),
    };
    SignedRequest::sign(accounts, &SendTweet::new(topic, content), &[author, &tweet])
}

// =============================================================================
// Sending and fetching
// =============================================================================

#[test]
fn test_send_new_tweet_and_fetch_it() {
    let mut program = create_program();
    let author = funded_author(&mut program);

    let address = program
        .send_tweet(&send_request(&author, "SheFi", "I am a SheFi Scholar"))
        .unwrap();

    let tweet = program.fetch_one(&address).unwrap();
    assert_eq!(tweet.author, author.identity());
    assert_eq!(tweet.topic, "SheFi");
    assert_eq!(tweet.content, "I am a SheFi Scholar");
    assert_eq!(tweet.timestamp, NOW);
}

#[test]
fn test_send_tweet_without_topic() {
    let mut program = create_program();
    let author = funded_author(&mut program);

    let address = program.send_tweet(&send_request(&author, "", "gm")).unwrap();

    let tweet = program.fetch_one(&address).unwrap();
    assert_eq!(tweet.topic, "");
    assert_eq!(tweet.content, "gm");
}

#[test]
fn test_send_tweet_from_different_author() {
    let mut program = create_program();
    let first = funded_author(&mut program);
    let other = funded_author(&mut program);

    program
        .send_tweet(&send_request(&first, "SheFi", "first"))
        .unwrap();
    let address = program
        .send_tweet(&send_request(&other, "gm", "Yay GM!"))
        .unwrap();

    assert_eq!(program.fetch_one(&address).unwrap().author, other.identity());
}

#[test]
fn test_limits_are_inclusive() {
    let mut program = create_program();
    let author = funded_author(&mut program);

    let address = program
        .send_tweet(&send_request(&author, &"t".repeat(50), &"c".repeat(280)))
        .unwrap();
    let tweet = program.fetch_one(&address).unwrap();
    assert_eq!(tweet.topic.len(), 50);
    assert_eq!(tweet.content.len(), 280);
}

#[test]
fn test_multibyte_characters_count_once() {
    let mut program = create_program();
    let author = funded_author(&mut program);

    let address = program
        .send_tweet(&send_request(&author, &"☕".repeat(50), &"🌱".repeat(280)))
        .unwrap();
    assert_eq!(program.fetch_one(&address).unwrap().topic, "☕".repeat(50));
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn test_topic_of_51_characters_is_rejected() {
    let mut program = create_program();
    let author = funded_author(&mut program);

    let err = program
        .send_tweet(&send_request(&author, &"x".repeat(51), "Hummus, am I right?"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TopicTooLong);
    assert!(err
        .to_string()
        .contains("The provided topic should be 50 characters long maximum."));
    assert!(program.fetch_all().unwrap().is_empty());
}

#[test]
fn test_content_of_281_characters_is_rejected() {
    let mut program = create_program();
    let author = funded_author(&mut program);

    let err = program
        .send_tweet(&send_request(&author, "veganism", &"x".repeat(281)))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ContentTooLong);
    assert!(err
        .to_string()
        .contains("The provided content should be 280 characters long maximum."));
}

#[test]
fn test_empty_content_is_rejected() {
    let mut program = create_program();
    let author = funded_author(&mut program);

    let err = program
        .send_tweet(&send_request(&author, "gm", ""))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ContentEmpty);
}

#[test]
fn test_signed_by_x_claiming_author_y_is_unauthorized() {
    let mut program = create_program();
    let signer = funded_author(&mut program);
    let claimed = funded_author(&mut program);
    let tweet = Keypair::generate();

    let accounts = SendTweetAccounts {
        tweet: tweet.identity(),
        author: claimed.identity(),
    };
    let request = SignedRequest::sign(
        accounts,
        &SendTweet::new("SheFi", "not mine"),
        &[&signer, &tweet],
    );

    let err = program.send_tweet(&request).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(program.balance(&claimed.identity()), FUNDS);
    assert!(program.fetch_all().unwrap().is_empty());
}

#[test]
fn test_authorization_is_checked_before_lengths() {
    let mut program = create_program();
    let signer = funded_author(&mut program);
    let tweet = Keypair::generate();

    let accounts = SendTweetAccounts {
        tweet: tweet.identity(),
        author: Identity::derive("somebody else"),
    };
    let request = SignedRequest::sign(
        accounts,
        &SendTweet::new("x".repeat(51), ""),
        &[&signer, &tweet],
    );

    assert_eq!(
        program.send_tweet(&request).unwrap_err().kind(),
        ErrorKind::Unauthorized
    );
}

#[test]
fn test_tweet_address_cannot_be_reused() {
    let mut program = create_program();
    let author = funded_author(&mut program);
    let request = send_request(&author, "SheFi", "once");

    program.send_tweet(&request).unwrap();
    let err = program.send_tweet(&request).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AllocationFailed);
    assert_eq!(program.fetch_all().unwrap().len(), 1);
}

// =============================================================================
// Filtered scans
// =============================================================================

#[test]
fn test_filter_tweets_by_author() {
    let mut program = create_program();
    let first = funded_author(&mut program);
    let other = funded_author(&mut program);

    program.send_tweet(&send_request(&first, "SheFi", "one")).unwrap();
    program.send_tweet(&send_request(&other, "gm", "Yay GM!")).unwrap();
    program.send_tweet(&send_request(&first, "", "two")).unwrap();

    let tweets = program.fetch_by_author(&first.identity()).unwrap();
    assert_eq!(tweets.len(), 2);
    assert!(tweets.iter().all(|t| t.tweet.author == first.identity()));

    let raw = program
        .fetch_filtered(8, first.identity().as_bytes())
        .unwrap();
    assert_eq!(raw, tweets);
}

#[test]
fn test_filter_tweets_by_topic() {
    let mut program = create_program();
    let author = funded_author(&mut program);

    program.send_tweet(&send_request(&author, "SheFi", "one")).unwrap();
    program.send_tweet(&send_request(&author, "", "gm")).unwrap();
    program.send_tweet(&send_request(&author, "SheFi", "two")).unwrap();
    program.send_tweet(&send_request(&author, "SheFiX", "three")).unwrap();

    let tweets = program.fetch_by_topic("SheFi").unwrap();
    assert_eq!(tweets.len(), 2);
    assert!(tweets.iter().all(|t| t.tweet.topic == "SheFi"));

    // raw bytes past the length prefix match as a prefix
    assert_eq!(program.fetch_filtered(52, b"SheFi").unwrap().len(), 3);
}

#[test]
fn test_combined_filters_must_all_match() {
    let mut program = create_program();
    let first = funded_author(&mut program);
    let other = funded_author(&mut program);

    program.send_tweet(&send_request(&first, "SheFi", "one")).unwrap();
    program.send_tweet(&send_request(&other, "SheFi", "theirs")).unwrap();
    program.send_tweet(&send_request(&first, "gm", "not this topic")).unwrap();
    program.send_tweet(&send_request(&first, "SheFi", "two")).unwrap();

    let tweets = program
        .fetch_matching(vec![Memcmp::author(&first.identity()), Memcmp::topic("SheFi")])
        .unwrap();

    let mut contents: Vec<_> = tweets.iter().map(|t| t.tweet.content.as_str()).collect();
    contents.sort();
    assert_eq!(contents, vec!["one", "two"]);
    assert!(tweets
        .iter()
        .all(|t| t.tweet.author == first.identity() && t.tweet.topic == "SheFi"));

    // either filter alone matches more
    assert_eq!(program.fetch_by_author(&first.identity()).unwrap().len(), 3);
    assert_eq!(program.fetch_by_topic("SheFi").unwrap().len(), 3);
}

#[test]
fn test_exact_field_query_on_store() {
    let mut program = create_program();
    let author = funded_author(&mut program);
    program.send_tweet(&send_request(&author, "SheFi", "one")).unwrap();

    let store = program.store();
    let matches: Vec<_> = store
        .query_by_exact_field(Field::Author, author.identity().as_bytes())
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(matches.len(), 1);

    let none = store
        .query_by_exact_field(Field::Timestamp, &(NOW + 1).to_le_bytes())
        .count();
    assert_eq!(none, 0);
}

#[test]
fn test_fetch_all_returns_every_tweet() {
    let mut program = create_program();
    let author = funded_author(&mut program);
    for i in 0..5 {
        program
            .send_tweet(&send_request(&author, "", &format!("tweet {}", i)))
            .unwrap();
    }

    let all = program.fetch_all().unwrap();
    assert_eq!(all.len(), 5);
    for keyed in &all {
        assert_eq!(program.fetch_one(&keyed.address).unwrap(), keyed.tweet);
    }
}

// =============================================================================
// Codec
// =============================================================================

#[test]
fn test_stored_bytes_decode_to_same_record() {
    let tweet = Tweet::new(Identity::derive("author"), -5, "☕", "gm ✨");
    let slot = tweet.encode_slot().unwrap();
    assert_eq!(Tweet::decode(&slot).unwrap(), tweet);
    assert_eq!(Tweet::decode(&tweet.encode()).unwrap(), tweet);
}
