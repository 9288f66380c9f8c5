//! `mrs items` -- list the most recently discovered items.

use tabled::Tabled;

use mrs_core::{Item, Monitor, format};

use crate::cli::{GlobalOpts, ItemsArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Search")]
    search: String,
}

fn to_row(item: &Item) -> ItemRow {
    ItemRow {
        title: format::truncate_title(&format::sanitize_text(&item.title)),
        price: format::fmt_price(item.price),
        search: item
            .search_name
            .as_deref()
            .map_or_else(|| "-".to_owned(), |s| format::sanitize_text(s)),
    }
}

pub async fn handle(monitor: &Monitor, args: &ItemsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    monitor.refresh_now().await?;

    let snapshot = monitor.store().recent_items_snapshot();
    let items: Vec<Item> = snapshot.iter().take(args.limit).cloned().collect();

    // Structured formats still emit an empty list for scripting.
    if items.is_empty() && matches!(global.output, OutputFormat::Table) {
        output::print_info(
            "No items yet. The backend hasn't discovered anything.",
            output::should_color(&global.color),
            global.quiet,
        );
        return Ok(());
    }

    let out = output::render_list(&global.output, &items, to_row, |i| i.title.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
