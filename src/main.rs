//! FlashKV CLI - issue one keyspace command
//!
//! Connects to a server, sends a single command through the typed client
//! and prints the decoded result the way redis-cli does.

use anyhow::{bail, Context};
use flashkv_client::commands::{MigrateOptions, ScanOptions, SortOptions};
use flashkv_client::{
    Client, ClientConfig, ObjectInfo, RespValue, ScanPage, SortResult, TcpDispatcher,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Parsed command line
struct Invocation {
    config: ClientConfig,
    verb: String,
    args: Vec<String>,
}

impl Invocation {
    /// Parse the invocation from command-line arguments
    fn from_args() -> anyhow::Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut builder = ClientConfig::builder();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--host" | "-h" => {
                    let Some(host) = args.get(i + 1) else {
                        bail!("--host requires a value");
                    };
                    builder = builder.host(host.as_str());
                    i += 2;
                }
                "--port" | "-p" => {
                    let Some(port) = args.get(i + 1) else {
                        bail!("--port requires a value");
                    };
                    builder = builder.port(port.as_str());
                    i += 2;
                }
                "--help" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-v" => {
                    println!("flashkv-cli version {}", flashkv_client::VERSION);
                    std::process::exit(0);
                }
                flag if flag.starts_with('-') => {
                    print_help();
                    bail!("unknown option: {}", flag);
                }
                _ => break,
            }
        }

        let Some(verb) = args.get(i) else {
            print_help();
            bail!("no command given");
        };

        Ok(Self {
            config: builder.build()?,
            verb: verb.to_ascii_uppercase(),
            args: args[i + 1..].to_vec(),
        })
    }
}

fn print_help() {
    println!(
        r#"
flashkv-cli - issue one keyspace command against a FlashKV or Redis server

USAGE:
    flashkv-cli [OPTIONS] <COMMAND> [ARGS...]

OPTIONS:
    -h, --host <HOST>    Server host (default: 127.0.0.1)
    -p, --port <PORT>    Server port (default: 6379)
    -v, --version        Print version information
        --help           Print this help message

COMMANDS:
    DEL key [key ...]            EXISTS key [key ...]
    DUMP key                     TYPE key
    EXPIRE key seconds           PEXPIRE key milliseconds
    EXPIREAT key timestamp       PEXPIREAT key timestamp
    TTL key                      PTTL key
    PERSIST key                  RANDOMKEY
    KEYS pattern                 MOVE key db
    RENAME key newkey            RENAMENX key newkey
    OBJECT REFCOUNT|ENCODING|IDLETIME key
    MIGRATE host port key db timeout [COPY] [REPLACE]
    SCAN cursor [MATCH pattern] [COUNT count]
    SORT key [BY pattern] [LIMIT offset count] [GET pattern ...]
         [ASC|DESC] [ALPHA] [STORE destination]
    WAIT numreplicas timeout

EXAMPLES:
    flashkv-cli EXPIRE session:42 30
    flashkv-cli -p 6380 SCAN 0 MATCH 'user:*' COUNT 100

LOGGING:
    Set RUST_LOG=debug to trace each dispatched command.
"#
    );
}

/// Returns the positional arguments, failing unless there are exactly `n`.
fn exact<'a>(verb: &str, args: &'a [String], n: usize) -> anyhow::Result<&'a [String]> {
    if args.len() != n {
        bail!("wrong number of arguments for '{}'", verb);
    }
    Ok(args)
}

fn integer(value: i64) -> RespValue {
    RespValue::integer(value)
}

fn flag(value: bool) -> RespValue {
    RespValue::integer(i64::from(value))
}

fn nullable(value: Option<impl Into<bytes::Bytes>>) -> RespValue {
    value.map_or(RespValue::Null, RespValue::bulk_string)
}

fn string_list(values: Vec<String>) -> RespValue {
    RespValue::array(values.into_iter().map(RespValue::bulk_string).collect())
}

fn scan_page(page: ScanPage) -> RespValue {
    RespValue::array(vec![
        RespValue::bulk_string(page.cursor.to_string()),
        string_list(page.keys),
    ])
}

fn sort_result(result: SortResult) -> RespValue {
    match result {
        SortResult::Values(values) => {
            RespValue::array(values.into_iter().map(nullable).collect())
        }
        SortResult::Stored(n) => RespValue::integer(n),
    }
}

fn object_info(info: ObjectInfo) -> RespValue {
    match info {
        ObjectInfo::Count(n) => RespValue::integer(n),
        ObjectInfo::Encoding(encoding) => RespValue::bulk_string(encoding),
        ObjectInfo::Missing => RespValue::Null,
    }
}

fn parse_migrate_options(verb: &str, flags: &[String]) -> anyhow::Result<MigrateOptions> {
    let mut options = MigrateOptions::default();
    for flag in flags {
        match flag.to_ascii_uppercase().as_str() {
            "COPY" => options.copy = true,
            "REPLACE" => options.replace = true,
            other => bail!("unknown {} option: {}", verb, other),
        }
    }
    Ok(options)
}

fn parse_scan_options(rest: &[String]) -> anyhow::Result<ScanOptions> {
    let mut options = ScanOptions::new();
    let mut words = rest.iter();
    while let Some(word) = words.next() {
        let value = words
            .next()
            .with_context(|| format!("SCAN option {} requires a value", word))?;
        options = match word.to_ascii_uppercase().as_str() {
            "MATCH" => options.pattern(value.as_str()),
            "COUNT" => options.count(value.as_str()),
            other => bail!("unknown SCAN option: {}", other),
        };
    }
    Ok(options)
}

fn parse_sort_options(rest: &[String]) -> anyhow::Result<SortOptions> {
    let mut options = SortOptions::new();
    let mut words = rest.iter();
    while let Some(word) = words.next() {
        let mut value = |clause: &str| {
            words
                .next()
                .map(String::as_str)
                .with_context(|| format!("SORT option {} requires a value", clause))
        };
        options = match word.to_ascii_uppercase().as_str() {
            "BY" => options.by(value("BY")?),
            "LIMIT" => {
                let offset = value("LIMIT")?;
                let count = value("LIMIT")?;
                options.limit((offset, count))
            }
            "GET" => options.get(value("GET")?),
            "STORE" => options.store(value("STORE")?),
            "ASC" => options.asc(),
            "DESC" => options.desc(),
            "ALPHA" => options.alpha(),
            other => bail!("unknown SORT option: {}", other),
        };
    }
    Ok(options)
}

/// Issues the command and returns the decoded result as a printable value.
async fn run(
    client: &mut Client<TcpDispatcher>,
    verb: &str,
    args: &[String],
) -> anyhow::Result<RespValue> {
    let reply = match verb {
        "DEL" | "EXISTS" => {
            if args.is_empty() {
                bail!("wrong number of arguments for '{}'", verb);
            }
            let keys = args.to_vec();
            let n = if verb == "DEL" {
                client.del(keys).await?
            } else {
                client.exists(keys).await?
            };
            integer(n)
        }
        "DUMP" => {
            let a = exact(verb, args, 1)?;
            nullable(client.dump(a[0].as_str()).await?)
        }
        "EXPIRE" => {
            let a = exact(verb, args, 2)?;
            flag(client.expire(a[0].as_str(), a[1].as_str()).await?)
        }
        "EXPIREAT" => {
            let a = exact(verb, args, 2)?;
            flag(client.expireat(a[0].as_str(), a[1].as_str()).await?)
        }
        "PEXPIRE" => {
            let a = exact(verb, args, 2)?;
            flag(client.pexpire(a[0].as_str(), a[1].as_str()).await?)
        }
        "PEXPIREAT" => {
            let a = exact(verb, args, 2)?;
            flag(client.pexpireat(a[0].as_str(), a[1].as_str()).await?)
        }
        "KEYS" => {
            let a = exact(verb, args, 1)?;
            string_list(client.keys(a[0].as_str()).await?)
        }
        "MIGRATE" => {
            if args.len() < 5 {
                bail!("wrong number of arguments for '{}'", verb);
            }
            let options = parse_migrate_options(verb, &args[5..])?;
            let moved = client
                .migrate(
                    args[0].as_str(),
                    args[1].as_str(),
                    args[2].as_str(),
                    args[3].as_str(),
                    args[4].as_str(),
                    options,
                )
                .await?;
            if moved {
                RespValue::ok()
            } else {
                RespValue::simple_string("NOKEY")
            }
        }
        "MOVE" => {
            let a = exact(verb, args, 2)?;
            flag(client.move_key(a[0].as_str(), a[1].as_str()).await?)
        }
        "OBJECT" => {
            let a = exact(verb, args, 2)?;
            let subcommand = a[0].to_ascii_uppercase();
            object_info(client.object(subcommand, a[1].as_str()).await?)
        }
        "PERSIST" => {
            let a = exact(verb, args, 1)?;
            flag(client.persist(a[0].as_str()).await?)
        }
        "PTTL" => {
            let a = exact(verb, args, 1)?;
            integer(client.pttl(a[0].as_str()).await?)
        }
        "TTL" => {
            let a = exact(verb, args, 1)?;
            integer(client.ttl(a[0].as_str()).await?)
        }
        "RANDOMKEY" => {
            exact(verb, args, 0)?;
            nullable(client.randomkey().await?)
        }
        "RENAME" => {
            let a = exact(verb, args, 2)?;
            client.rename(a[0].as_str(), a[1].as_str()).await?;
            RespValue::ok()
        }
        "RENAMENX" => {
            let a = exact(verb, args, 2)?;
            flag(client.renamenx(a[0].as_str(), a[1].as_str()).await?)
        }
        "SCAN" => {
            let Some((cursor, rest)) = args.split_first() else {
                bail!("wrong number of arguments for '{}'", verb);
            };
            let options = parse_scan_options(rest)?;
            scan_page(client.scan(cursor.as_str(), &options).await?)
        }
        "SORT" => {
            let Some((key, rest)) = args.split_first() else {
                bail!("wrong number of arguments for '{}'", verb);
            };
            let options = parse_sort_options(rest)?;
            sort_result(client.sort(key.as_str(), &options).await?)
        }
        "TYPE" => {
            let a = exact(verb, args, 1)?;
            RespValue::simple_string(client.key_type(a[0].as_str()).await?)
        }
        "WAIT" => {
            let a = exact(verb, args, 2)?;
            integer(client.wait(a[0].as_str(), a[1].as_str()).await?)
        }
        other => bail!("unsupported command '{}'", other),
    };
    Ok(reply)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let invocation = Invocation::from_args()?;

    // Set up logging; quiet unless RUST_LOG says otherwise
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut client = Client::connect(&invocation.config)
        .await
        .with_context(|| format!("could not connect to {}", invocation.config.address()))?;

    let reply = run(&mut client, &invocation.verb, &invocation.args).await?;
    println!("{}", reply);
    Ok(())
}
