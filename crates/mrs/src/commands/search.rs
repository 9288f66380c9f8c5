//! `mrs test-url` -- validate a search URL and dry-run it.

use mrs_core::{Command, CommandOutcome, Monitor, UrlValidation};

use crate::cli::{GlobalOpts, TestUrlArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(monitor: &Monitor, args: &TestUrlArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    // Reject an empty URL before any request goes out.
    let url = args.url.trim();
    if url.is_empty() {
        return Err(CliError::Validation {
            field: "url".into(),
            reason: "search URL must not be empty".into(),
        });
    }

    let bar = util::spinner("Testing search URL...", global.quiet);
    let result = monitor
        .execute(Command::TestSearchUrl { url: url.to_owned() })
        .await;
    util::clear_spinner(bar);

    match result? {
        CommandOutcome::UrlTested(UrlValidation::Valid {
            items_found,
            sample_titles,
            test_error,
        }) => {
            output::print_success(
                &format!("Valid URL! Found {items_found} items"),
                color,
                global.quiet,
            );
            if !sample_titles.is_empty() {
                output::print_info(
                    &format!("Sample: {}", sample_titles.join(", ")),
                    color,
                    global.quiet,
                );
            }
            if let Some(ref warning) = test_error {
                output::print_warning(warning, color);
            }
            Ok(())
        }

        CommandOutcome::UrlTested(UrlValidation::Invalid { error, test_error }) => {
            if let Some(ref warning) = test_error {
                output::print_warning(warning, color);
            }
            Err(CliError::InvalidSearchUrl {
                reason: error.unwrap_or_else(|| "the backend rejected this URL".into()),
            })
        }

        other => Err(CliError::ApiError {
            message: format!("unexpected command outcome: {other:?}"),
            status: None,
        }),
    }
}
