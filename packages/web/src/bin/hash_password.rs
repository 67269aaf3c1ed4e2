//! Print an Argon2 hash suitable for `auth.password`.
//!
//! ```sh
//! cargo run --bin hash_password -- 'my admin password'
//! ```
//!
//! Without an argument the password is read from the first line of stdin.

use std::io::{self, BufRead};

use anyhow::{bail, Context};
use clap::Parser;

#[derive(Parser)]
#[command(name = "hash_password")]
#[command(about = "Hash the admin password for the auth.password setting", long_about = None)]
struct Cli {
    /// Password to hash; read from stdin when omitted
    password: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let password = match cli.password {
        Some(password) => password,
        None => {
            let mut line = String::new();
            io::stdin()
                .lock()
                .read_line(&mut line)
                .context("Failed to read password from stdin")?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if password.is_empty() {
        bail!("Password must not be empty");
    }

    let hash = api::auth::hash_password(&password).map_err(anyhow::Error::msg)?;
    println!("{hash}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_password_argument_is_optional() {
        let cli = Cli::try_parse_from(["hash_password", "s3cret"]).unwrap();
        assert_eq!(cli.password.as_deref(), Some("s3cret"));

        let cli = Cli::try_parse_from(["hash_password"]).unwrap();
        assert!(cli.password.is_none());
    }
}
