//! Runs parsed subcommands against an open database handle.

use anyhow::{Context, Result};
use tracing::info;

use client_book::{ClientPatch, Database, SearchCriteria};

use super::{Command, patch_from_args};

pub async fn run(command: Command, db: &Database) -> Result<()> {
    match command {
        Command::Init => {
            db.create_tables().await?;
            println!("Tables are ready.");
        }
        Command::AddClient {
            first_name,
            last_name,
            email,
        } => {
            let id = db
                .add_client(&first_name, &last_name, &email)
                .await
                .with_context(|| format!("failed to add client {first_name} {last_name}"))?;
            println!("Client added with ID {id}.");
        }
        Command::AddPhone { client_id, phone } => {
            let id = db
                .add_phone(client_id, &phone)
                .await
                .with_context(|| format!("failed to add phone for client {client_id}"))?;
            println!("Phone added with ID {id}.");
        }
        Command::UpdateClient {
            client_id,
            first_name,
            last_name,
            email,
        } => {
            let patch = patch_from_args(first_name, last_name, email);
            if patch.is_empty() {
                println!("Nothing to update.");
                return Ok(());
            }
            let updated = db
                .update_client(client_id, &patch)
                .await
                .with_context(|| format!("failed to update client {client_id}"))?;
            println!("{updated} client(s) updated.");
        }
        Command::DeletePhone { phone_id } => {
            let deleted = db.delete_phone(phone_id).await?;
            println!("{deleted} phone(s) deleted.");
        }
        Command::DeleteClient { client_id } => {
            db.delete_client(client_id).await?;
        }
        Command::Find(args) => {
            let outcome = db.find_client(&SearchCriteria::from(args)).await;
            println!("{outcome}");
        }
        Command::Demo => demo(db).await?,
    }

    Ok(())
}

/// Create two clients, give one a phone, patch the other, search, then clean up.
async fn demo(db: &Database) -> Result<()> {
    db.create_tables().await?;

    let messi = db.add_client("Lionel", "Messi", "fcb_lm9@gmail.com").await?;
    let ronaldo = db
        .add_client("Cristiano", "Ronaldo", "rm_cr7.@gmail.com")
        .await?;

    let phone = db.add_phone(messi, "8-962-786-4052").await?;

    let patch = ClientPatch::new().first_name("Vinicius").last_name("Junior");
    db.update_client(ronaldo, &patch).await?;

    db.delete_phone(phone).await?;

    let outcome = db
        .find_client(&SearchCriteria::new().first_name("Vinicius"))
        .await;
    println!("{outcome}");

    for id in [messi, ronaldo] {
        db.delete_client(id).await?;
    }

    info!("demo finished");
    Ok(())
}
