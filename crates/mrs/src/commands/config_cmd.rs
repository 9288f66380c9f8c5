//! `mrs config` -- inspect and edit the configuration file.

use mrs_config::Profile;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match &args.command {
        ConfigCommand::Path => {
            println!("{}", mrs_config::config_path().display());
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = mrs_config::load_config_or_default();
            let rendered = toml::to_string_pretty(&cfg).map_err(|e| CliError::Config {
                message: e.to_string(),
            })?;
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        ConfigCommand::Init { server, name } => {
            // Validate before writing anything.
            let _: url::Url = server.parse().map_err(|_| CliError::Validation {
                field: "server".into(),
                reason: format!("invalid URL: {server}"),
            })?;

            let mut cfg = mrs_config::load_config_or_default();
            cfg.profiles.insert(
                name.clone(),
                Profile {
                    server: server.clone(),
                    timeout: None,
                    stats_interval: None,
                    items_interval: None,
                },
            );
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(name.clone());
            }

            mrs_config::save_config(&cfg).map_err(CliError::from)?;
            output::print_success(
                &format!("Profile '{name}' saved to {}", mrs_config::config_path().display()),
                output::should_color(&global.color),
                global.quiet,
            );
            Ok(())
        }
    }
}
