//! `dnssync config`: inspect the resolved configuration and store secrets.

use dialoguer::Password;

use dnssync_config::CredentialsFile;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub fn handle(args: ConfigArgs, settings: &Settings, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let rendered = match global.output {
                OutputFormat::Dsl => dnssync_config::render_config(&settings.config)?,
                OutputFormat::Json => output::render_json_pretty(&settings.config)?,
                OutputFormat::Yaml => output::render_yaml(&settings.config)?,
            };
            output::print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&settings.path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::SetPassword { customer } => {
            let customer = match customer {
                Some(customer) => customer,
                None => CredentialsFile::load(&settings.config.credentials)?.customer,
            };
            let password = Password::new()
                .with_prompt(format!("API password for customer {customer}"))
                .interact()
                .map_err(prompt_err)?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "api_password".into(),
                    reason: "must not be empty".into(),
                });
            }
            dnssync_config::store_api_password(&customer, &password)?;
            if !global.quiet {
                eprintln!("API password for customer {customer} stored in system keyring");
            }
            Ok(())
        }
    }
}
