use std::{io, process};

use clap::{Parser, Subcommand};
use log::{error, info};
use wallet::Keystore;

mod biz;
mod config;
mod error;
mod network;

use biz::{HashAlgo, NameHash};
use config::Config;
use error::Error;
use network::RpcConnector;

/// Reserve names on a name registry contract and look up their owners
#[derive(Debug, Parser)]
struct Opts {
    #[command(subcommand)]
    subcmd: SubCommand,
}

#[derive(Debug, Subcommand)]
enum SubCommand {
    /// Create a new account in the keystore
    NewAccount {
        /// the keystore directory, default is `./keystore/`
        #[arg(short, long, default_value_t = String::from("./keystore/"))]
        keystore_dir: String,
    },
    /// List the accounts of the keystore, the first one signs reservations
    Accounts {
        /// the keystore directory, default is `./keystore/`
        #[arg(short, long, default_value_t = String::from("./keystore/"))]
        keystore_dir: String,
    },
    /// Print the registry key of a name
    Hash {
        name: String,
        #[arg(long, value_enum, default_value_t = HashAlgo::Sha256)]
        algo: HashAlgo,
    },
    /// Reserve a name, paying the registry fee
    Reserve {
        name: String,
        /// the config file path, default is `config.toml`
        #[arg(short, long, default_value_t = String::from("config.toml"))]
        config: String,
        /// the keystore password, prompted for if not given
        #[arg(long, env = "REGISTRY_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Print the current owner of a name
    Owner {
        name: String,
        /// the config file path, default is `config.toml`
        #[arg(short, long, default_value_t = String::from("config.toml"))]
        config: String,
    },
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    let opts = Opts::parse();

    let result = match opts.subcmd {
        SubCommand::NewAccount { keystore_dir } => new_account(&keystore_dir),
        SubCommand::Accounts { keystore_dir } => list_accounts(&keystore_dir),
        SubCommand::Hash { name, algo } => {
            println!("{}", NameHash::compute(&name, algo));
            Ok(())
        }
        SubCommand::Reserve {
            name,
            config,
            password,
        } => reserve(&config, &name, password).await,
        SubCommand::Owner { name, config } => owner(&config, &name).await,
    };

    if let Err(err) = result {
        error!("❌ {}", err);
        process::exit(err.exit_code());
    }
}

fn new_account(keystore_dir: &str) -> Result<(), Error> {
    let password = rpassword::prompt_password("Password: ")?;
    let confirm = rpassword::prompt_password("Repeat password: ")?;
    if password != confirm {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "passwords do not match").into());
    }

    let acc = Keystore::open(keystore_dir).new_account(&password)?;
    info!("📣 New account: {}", acc.address);
    info!("📣 Saved in: {:?}", acc.path);
    println!("{}", acc.address);
    Ok(())
}

fn list_accounts(keystore_dir: &str) -> Result<(), Error> {
    for acc in Keystore::open(keystore_dir).accounts()? {
        println!("{} {}", acc.address, acc.path.display());
    }
    Ok(())
}

async fn reserve(config_file: &str, name: &str, password: Option<String>) -> Result<(), Error> {
    let config = Config::load(config_file)?;
    let connector = RpcConnector::new(&config);
    let password = || match password {
        Some(password) => Ok(password),
        None => rpassword::prompt_password("Password: "),
    };

    biz::reserve_name(&config, name, &connector, password, &mut io::stdout()).await?;
    Ok(())
}

async fn owner(config_file: &str, name: &str) -> Result<(), Error> {
    let config = Config::load(config_file)?;
    let connector = RpcConnector::new(&config);

    biz::lookup_owner(&config, name, &connector, &mut io::stdout()).await?;
    Ok(())
}
