//! Config command handlers. These never contact the backend.

use tabled::builder::Builder;

use adminkit_config::Profile;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::file_path(global).display().to_string(), false);
            Ok(())
        }

        ConfigCommand::Show => {
            let settings = config::resolve_settings(global)?;
            let mut builder = Builder::default();
            builder.push_record(["Setting", "Value"]);
            builder.push_record(["profile".to_owned(), settings.profile.clone()]);
            builder.push_record(["base_url".to_owned(), settings.base_url.to_string()]);
            builder.push_record(["schema_path".to_owned(), settings.store.schema_path.clone()]);
            builder.push_record(["label_field".to_owned(), settings.store.label_field.clone()]);
            builder.push_record([
                "max_resolve_depth".to_owned(),
                settings.store.max_resolve_depth.to_string(),
            ]);
            builder.push_record([
                "timeout".to_owned(),
                format!("{}s", settings.transport.timeout.as_secs()),
            ]);
            builder.push_record(["tls".to_owned(), format!("{:?}", settings.transport.tls)]);
            for rule in &settings.store.ordering.rules {
                builder.push_record([
                    format!("ordering[{}]", rule.contains),
                    rule.ordering.clone(),
                ]);
            }
            builder.push_record([
                "ordering".to_owned(),
                settings.store.ordering.default.clone(),
            ]);

            let mut table = builder.build();
            table.with(tabled::settings::Style::rounded());
            output::print_output(&table.to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init {
            url,
            name,
            set_default,
        } => {
            adminkit_config::parse_base_url(&url)?;

            let path = config::file_path(global);
            let mut cfg = adminkit_config::load_config_from(&path)?;
            cfg.profiles.insert(
                name.clone(),
                Profile {
                    base_url: url,
                    ..Profile::default()
                },
            );
            if set_default || cfg.profiles.len() == 1 {
                cfg.default_profile = Some(name.clone());
            }
            adminkit_config::save_config_to(&cfg, &path)?;

            if !global.quiet {
                eprintln!("Profile '{name}' written to {}", path.display());
            }
            Ok(())
        }
    }
}
