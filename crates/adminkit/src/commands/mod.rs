//! Command dispatch for everything that talks to the backend.

pub mod config_cmd;
pub mod records;
pub mod schema;
pub mod util;

use adminkit_api::RestClient;
use adminkit_core::ItemStore;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a backend command to its handler.
pub async fn dispatch(
    cmd: Command,
    store: &ItemStore<RestClient>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::List(args) => records::list(store, args, global).await,
        Command::Find(args) => records::find(store, args, global).await,
        Command::Next(args) => records::next(store, args, global).await,
        Command::Upsert(args) => records::upsert(store, args, global).await,
        Command::Delete(args) => records::delete(store, args, global).await,
        Command::Schema(args) => schema::handle(store, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
