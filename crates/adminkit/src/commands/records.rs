//! Record command handlers: list, find, next, upsert, delete.

use adminkit_api::RestClient;
use adminkit_core::{ItemStore, Record};

use crate::cli::{DeleteArgs, FindArgs, GlobalOpts, ListArgs, NextArgs, UpsertArgs};
use crate::error::CliError;
use crate::output;

use super::util;

type Store = ItemStore<RestClient>;

// ── Reads ───────────────────────────────────────────────────────────

pub async fn list(store: &Store, args: ListArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let params = util::query_params(&args.query.params)?;
    let records = store
        .list(&args.endpoint, &params, args.query.force)
        .await?;

    let out = output::render_records(global.format(), &records)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn find(store: &Store, args: FindArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let params = util::query_params(&args.query.params)?;
    let filter = util::filter(&args.conditions)?;

    let out = if args.all {
        let matches = store
            .find_many(&args.endpoint, &filter, &params, args.query.force)
            .await?;
        output::render_records(global.format(), &matches)?
    } else {
        let found = store
            .find_one(&args.endpoint, &filter, &params, args.query.force)
            .await?
            .ok_or(CliError::NoMatch)?;
        output::render_record(global.format(), &found)?
    };

    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn next(store: &Store, args: NextArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let params = util::query_params(&args.query.params)?;
    let current = util::loose_value(&args.id);
    let step = isize::try_from(args.step).map_err(|_| CliError::Validation {
        field: "step".into(),
        reason: format!("{} is too large", args.step),
    })?;
    let direction = if args.previous { -step } else { step };

    let adjacent = store
        .get_adjacent(&args.endpoint, &current, direction, &params, args.query.force)
        .await?
        .ok_or(CliError::NoMatch)?;

    let out = output::render_record(global.format(), &adjacent)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Mutations ───────────────────────────────────────────────────────

pub async fn upsert(store: &Store, args: UpsertArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let body = match (args.data, args.from_file) {
        (Some(inline), _) => serde_json::from_str(&inline)?,
        (None, Some(path)) => util::read_json_file(&path)?,
        (None, None) => {
            return Err(CliError::Validation {
                field: "data".into(),
                reason: "pass the record with --data or --from-file".into(),
            });
        }
    };
    let record = Record::try_from(body).map_err(|_| CliError::Validation {
        field: "data".into(),
        reason: "the record must be a JSON object".into(),
    })?;

    let action = if record.has_identity() {
        "updated"
    } else {
        "created"
    };
    let saved = store.upsert(&args.endpoint, &record).await?;

    let out = match Record::try_from(saved) {
        Ok(saved) => output::render_record(global.format(), &saved)?,
        Err(_) => String::new(),
    };
    output::print_output(&out, global.quiet);
    if !global.quiet {
        eprintln!("Record {action}");
    }
    Ok(())
}

pub async fn delete(store: &Store, args: DeleteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if !util::confirm(
        &format!("Delete {}{}? This is destructive.", args.endpoint, args.id),
        global.yes,
    )? {
        return Ok(());
    }

    let id = util::loose_value(&args.id);
    store.remove(&args.endpoint, &id).await?;
    if !global.quiet {
        eprintln!("Record deleted");
    }
    Ok(())
}
