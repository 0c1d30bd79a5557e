//! Vault entry commands.
//!
//! Provides `passvault entry add|list|get|update|delete`, always scoped to
//! the owner given by `--user` or `PASSVAULT_USER`.

use clap::Args;
use passvault_core::{generator, Config, PasswordPolicy, SecretString};
use passvault_vault::{FieldUpdate, PlainRecord, RecordUpdate};

use crate::render;

/// Entry command arguments.
#[derive(Args)]
pub struct EntryArgs {
    #[command(subcommand)]
    pub command: EntryCommand,
}

#[derive(clap::Subcommand)]
pub enum EntryCommand {
    /// Add a new entry (prompts for the password unless given)
    Add {
        /// Owner of the entry
        #[arg(long, env = "PASSVAULT_USER")]
        user: String,

        /// Entry title
        #[arg(long)]
        title: String,

        /// Account username
        #[arg(long)]
        username: String,

        /// Account password (if omitted, prompts for hidden input)
        #[arg(long, conflicts_with = "generate")]
        password: Option<String>,

        /// Generate the password using the configured policy
        #[arg(long)]
        generate: bool,

        /// Site URL
        #[arg(long)]
        url: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// List entries, newest first
    List {
        /// Owner of the entries
        #[arg(long, env = "PASSVAULT_USER")]
        user: String,

        /// Case-insensitive filter on title, username, url and notes
        #[arg(short, long)]
        search: Option<String>,

        /// Print passwords instead of masking them
        #[arg(long)]
        reveal: bool,
    },

    /// Show one entry
    Get {
        /// Entry id
        id: String,

        /// Owner of the entry
        #[arg(long, env = "PASSVAULT_USER")]
        user: String,

        /// Print the password instead of masking it
        #[arg(long)]
        reveal: bool,
    },

    /// Change some fields of an entry
    Update {
        /// Entry id
        id: String,

        /// Owner of the entry
        #[arg(long, env = "PASSVAULT_USER")]
        user: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New username
        #[arg(long)]
        username: Option<String>,

        /// New password
        #[arg(long, conflicts_with = "generate")]
        password: Option<String>,

        /// Generate a new password using the configured policy
        #[arg(long)]
        generate: bool,

        /// New URL (an empty value removes it)
        #[arg(long, conflicts_with = "clear_url")]
        url: Option<String>,

        /// Remove the URL
        #[arg(long)]
        clear_url: bool,

        /// New notes (an empty value removes them)
        #[arg(long, conflicts_with = "clear_notes")]
        notes: Option<String>,

        /// Remove the notes
        #[arg(long)]
        clear_notes: bool,
    },

    /// Delete an entry
    Delete {
        /// Entry id
        id: String,

        /// Owner of the entry
        #[arg(long, env = "PASSVAULT_USER")]
        user: String,
    },
}

/// Map an optional-field flag pair onto an update action.
fn optional_update(value: Option<String>, clear: bool) -> FieldUpdate {
    if clear {
        return FieldUpdate::Clear;
    }
    match value {
        None => FieldUpdate::Keep,
        Some(v) => match SecretString::non_blank(Some(v)) {
            Some(v) => FieldUpdate::Set(v),
            None => FieldUpdate::Clear,
        },
    }
}

fn generate_password(config: &Config) -> anyhow::Result<SecretString> {
    let policy = PasswordPolicy::from(&config.generator);
    Ok(generator::generate(&policy)?)
}

/// Run the entry command.
pub async fn run(args: EntryArgs, config: &Config) -> anyhow::Result<()> {
    let service = super::open_service(config).await?;

    match args.command {
        EntryCommand::Add {
            user,
            title,
            username,
            password,
            generate,
            url,
            notes,
        } => {
            let password = match password {
                Some(p) => SecretString::new(p),
                None if generate => {
                    let generated = generate_password(config)?;
                    eprintln!("Generated password: {}", generated.expose_secret());
                    generated
                }
                None => rpassword::prompt_password(format!("Password for '{title}': "))
                    .map(SecretString::new)
                    .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?,
            };

            let record = PlainRecord {
                title: title.into(),
                username: username.into(),
                password,
                url: SecretString::non_blank(url),
                notes: SecretString::non_blank(notes),
            };

            let id = service.create(&user, &record).await?;
            println!("{}", id);
        }

        EntryCommand::List {
            user,
            search,
            reveal,
        } => {
            let mut entries = service.list(&user).await?;
            if let Some(term) = search.as_deref() {
                entries.retain(|e| e.matches(term));
            }
            render::render_entry_table(&entries, reveal);
        }

        EntryCommand::Get { id, user, reveal } => {
            let entry = service.get(&id, &user).await?;
            render::render_entry(&entry, reveal);
        }

        EntryCommand::Update {
            id,
            user,
            title,
            username,
            password,
            generate,
            url,
            clear_url,
            notes,
            clear_notes,
        } => {
            let password = match password {
                Some(p) => Some(SecretString::new(p)),
                None if generate => {
                    let generated = generate_password(config)?;
                    eprintln!("Generated password: {}", generated.expose_secret());
                    Some(generated)
                }
                None => None,
            };

            let update = RecordUpdate {
                title: title.map(SecretString::new),
                username: username.map(SecretString::new),
                password,
                url: optional_update(url, clear_url),
                notes: optional_update(notes, clear_notes),
            };

            service.update(&id, &user, &update).await?;
            println!("Entry '{}' updated.", id);
        }

        EntryCommand::Delete { id, user } => {
            service.delete(&id, &user).await?;
            println!("Entry '{}' deleted.", id);
        }
    }

    Ok(())
}
