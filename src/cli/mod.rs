pub mod handler;

use clap::{Args, Parser, Subcommand};

use client_book::{ClientPatch, Combinator, SearchCriteria};

/// Manage clients and their phone numbers in PostgreSQL
#[derive(Parser)]
#[command(name = "client-book", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the clients and phones tables if they do not exist
    Init,

    /// Add a client
    AddClient {
        first_name: String,
        last_name: String,
        email: String,
    },

    /// Add a phone number to an existing client
    AddPhone { client_id: i32, phone: String },

    /// Change some fields of a client; omitted or empty fields are kept
    UpdateClient {
        client_id: i32,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },

    /// Delete a single phone number
    DeletePhone { phone_id: i32 },

    /// Delete a client together with all of its phones
    DeleteClient { client_id: i32 },

    /// Find the first client matching any (or, with --all, every) criterion
    Find(FindArgs),

    /// Run the sample scenario end to end
    Demo,
}

#[derive(Args, Debug, Default)]
pub struct FindArgs {
    /// Substring of the first name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Substring of the last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Substring of the email
    #[arg(long)]
    pub email: Option<String>,

    /// Substring of any phone owned by the client
    #[arg(long)]
    pub phone: Option<String>,

    /// Require every given criterion to match instead of any one
    #[arg(long)]
    pub all: bool,
}

impl From<FindArgs> for SearchCriteria {
    fn from(args: FindArgs) -> Self {
        SearchCriteria {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            combinator: if args.all {
                Combinator::All
            } else {
                Combinator::Any
            },
        }
    }
}

pub fn patch_from_args(
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
) -> ClientPatch {
    ClientPatch {
        first_name,
        last_name,
        email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_flags_map_to_criteria() {
        let cli = Cli::try_parse_from([
            "client-book",
            "find",
            "--first-name",
            "Vin",
            "--phone",
            "4052",
            "--all",
        ])
        .unwrap();

        let Command::Find(args) = cli.command else {
            panic!("expected find");
        };
        let criteria = SearchCriteria::from(args);
        assert_eq!(criteria.first_name.as_deref(), Some("Vin"));
        assert_eq!(criteria.phone.as_deref(), Some("4052"));
        assert!(criteria.last_name.is_none());
        assert_eq!(criteria.combinator, Combinator::All);
    }

    #[test]
    fn find_defaults_to_any() {
        let criteria = SearchCriteria::from(FindArgs::default());
        assert_eq!(criteria.combinator, Combinator::Any);
        assert!(criteria.active().is_empty());
    }

    #[test]
    fn update_parses_optional_fields() {
        let cli = Cli::try_parse_from([
            "client-book",
            "update-client",
            "2",
            "--last-name",
            "Junior",
        ])
        .unwrap();

        let Command::UpdateClient {
            client_id,
            first_name,
            last_name,
            email,
        } = cli.command
        else {
            panic!("expected update-client");
        };
        assert_eq!(client_id, 2);
        let patch = patch_from_args(first_name, last_name, email);
        assert_eq!(patch.assignments(), vec![("last_name", "Junior")]);
    }

    #[test]
    fn ids_must_be_integers() {
        assert!(Cli::try_parse_from(["client-book", "delete-client", "two"]).is_err());
    }
}
