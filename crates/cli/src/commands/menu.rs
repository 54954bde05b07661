//! Menu listing.

use std::io::Write;

use quickbite_core::CategoryFilter;

use super::{CliError, Context};

/// Print the items matching `filter` and `search`, one per line.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn list(
    context: &Context,
    filter: CategoryFilter,
    search: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let items = context.catalog.query(filter, search);
    if items.is_empty() {
        writeln!(out, "No dishes match your search.")?;
        return Ok(());
    }

    for item in items {
        writeln!(
            out,
            "{:>3}  {:<22} {:<8} {:>6}",
            item.id.to_string(),
            item.name,
            item.category.as_str(),
            item.price.display_compact()
        )?;
    }
    Ok(())
}
