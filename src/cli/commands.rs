//! CLI command implementations
//!
//! Each command returns the `data` payload of its response; `run_command`
//! writes it (or the error) as one JSON line on stdout.

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

use crate::clock::SystemClock;
use crate::config::TweetConfig;
use crate::identity::{read_keypair_file, write_keypair_file, Identity, Keypair};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::program::{SendTweet, SendTweetAccounts, SignedRequest, TweetProgram};
use crate::store::{Bank, FileBackend, Memcmp, RecordStore};
use crate::validator::MutationValidator;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

type CliProgram = TweetProgram<FileBackend, SystemClock>;

/// Parse arguments and run the command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(&cli.config, cli.command)
}

/// Run one command, writing its response to stdout
pub fn run_command(config_path: &Path, cmd: Command) -> CliResult<()> {
    let result = match cmd {
        Command::Init => init(config_path),
        Command::Keygen { out } => keygen(&out),
        Command::Airdrop { to, lamports } => airdrop(config_path, &to, lamports),
        Command::Send {
            keypair,
            topic,
            content,
        } => send(config_path, &keypair, &topic, &content),
        Command::Fetch { address } => fetch(config_path, &address),
        Command::List {
            author,
            topic,
            memcmp,
        } => list(config_path, author.as_deref(), topic.as_deref(), &memcmp),
    };

    match result {
        Ok(data) => write_response(data),
        Err(err) => {
            write_error(err.code_str(), err.message())?;
            Err(err)
        }
    }
}

/// Create the data directory with an empty slot log and bank
pub fn init(config_path: &Path) -> CliResult<Value> {
    let config = load_config(config_path)?;
    let data_dir = config.data_path();

    if is_initialized(data_dir) {
        return Err(CliError::already_initialized());
    }

    fs::create_dir_all(data_dir.join("data")).map_err(|e| {
        CliError::config_error(format!(
            "Failed to create directory {}: {}",
            data_dir.display(),
            e
        ))
    })?;
    FileBackend::open(data_dir)?;
    Bank::open(data_dir)?;

    Ok(json!({"initialized": true, "data_dir": data_dir}))
}

/// Write a fresh keypair to `out`
pub fn keygen(out: &Path) -> CliResult<Value> {
    let keypair = Keypair::generate();
    write_keypair_file(&keypair, out)?;
    Ok(json!({"identity": keypair.identity(), "path": out}))
}

/// Credit `lamports` to the identity `to`
pub fn airdrop(config_path: &Path, to: &str, lamports: u64) -> CliResult<Value> {
    let mut program = open_program(config_path)?;
    let to = Identity::from_hex(to)?;
    let balance = program.airdrop(&to, lamports)?;
    Ok(json!({"identity": to, "balance": balance}))
}

/// Sign a tweet with the author keypair and a fresh tweet keypair, then send it
pub fn send(
    config_path: &Path,
    keypair_path: &Path,
    topic: &str,
    content: &str,
) -> CliResult<Value> {
    let mut program = open_program(config_path)?;
    let author = read_keypair_file(keypair_path)?;
    let tweet = Keypair::generate();

    let accounts = SendTweetAccounts {
        tweet: tweet.identity(),
        author: author.identity(),
    };
    let instruction = SendTweet::new(topic, content);
    let request = SignedRequest::sign(accounts, &instruction, &[&author, &tweet]);

    let address = program.send_tweet(&request)?;
    let stored = program.fetch_one(&address)?;
    Ok(json!({"address": address, "tweet": stored}))
}

/// Read the tweet at `address`
pub fn fetch(config_path: &Path, address: &str) -> CliResult<Value> {
    let program = open_program(config_path)?;
    let address = Identity::from_hex(address)?;
    let tweet = program.fetch_one(&address)?;
    Ok(json!({"address": address, "tweet": tweet}))
}

/// Scan tweets matching every given filter
pub fn list(
    config_path: &Path,
    author: Option<&str>,
    topic: Option<&str>,
    memcmp: &[String],
) -> CliResult<Value> {
    let mut filters = Vec::new();
    if let Some(author) = author {
        filters.push(Memcmp::author(&Identity::from_hex(author)?));
    }
    if let Some(topic) = topic {
        filters.push(Memcmp::topic(topic));
    }
    for raw in memcmp {
        filters.push(parse_memcmp(raw)?);
    }

    let program = open_program(config_path)?;
    let tweets = program.fetch_matching(filters)?;
    Ok(serde_json::to_value(tweets)?)
}

/// Parses an `OFFSET:HEX` filter
pub fn parse_memcmp(raw: &str) -> CliResult<Memcmp> {
    let (offset, bytes) = raw.split_once(':').ok_or_else(|| {
        CliError::invalid_argument(format!("memcmp '{}' is not OFFSET:HEX", raw))
    })?;
    let offset: usize = offset
        .parse()
        .map_err(|e| CliError::invalid_argument(format!("memcmp offset '{}': {}", offset, e)))?;
    let bytes = hex::decode(bytes)
        .map_err(|e| CliError::invalid_argument(format!("memcmp bytes '{}': {}", bytes, e)))?;
    Ok(Memcmp::new(offset, bytes))
}

fn load_config(config_path: &Path) -> CliResult<TweetConfig> {
    let config = TweetConfig::load(config_path)?;
    Logger::set_min_severity(config.log_severity()?);
    let data_dir = config.data_dir.display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("data_dir", data_dir.as_str())]);
    Ok(config)
}

fn open_program(config_path: &Path) -> CliResult<CliProgram> {
    let config = load_config(config_path)?;
    let data_dir = config.data_path();

    if !is_initialized(data_dir) {
        return Err(CliError::not_initialized());
    }

    let backend = FileBackend::open(data_dir).map_err(|e| {
        if e.is_fatal() {
            let message = e.to_string();
            log_event_with_fields(Event::StoreCorruption, &[("error", message.as_str())]);
        }
        e
    })?;
    let bank = Bank::open(data_dir)?;
    let store = RecordStore::new(backend, bank, config.rent());

    let slots = store.slot_count().to_string();
    log_event_with_fields(Event::StoreOpened, &[("slots", slots.as_str())]);

    Ok(TweetProgram::new(
        store,
        MutationValidator::new(config.length_unit),
        SystemClock,
    ))
}

fn is_initialized(data_dir: &Path) -> bool {
    data_dir.join("data").exists()
}
