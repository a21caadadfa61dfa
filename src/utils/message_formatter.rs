/// Pure functions for card, share and file-name text
use crate::constants::DEFAULT_WISH;
use crate::models::PersonRecord;
use crate::utils::string_utils::sanitize_file_stem;

/// Header shown on every birthday card
pub const CARD_HEADER: &str = "Happy Birthday";

/// Empty-state title
pub const EMPTY_TITLE: &str = "Tidak Ada Ulang Tahun";

/// Empty-state hint
pub const EMPTY_HINT: &str = "Hari ini sepi, coba cek besok ya.";

/// Build the share-sheet title for a person
pub fn build_share_title(person: &PersonRecord) -> String {
    format!("HBD {}!", person.name)
}

/// Build the share-sheet text for a person
pub fn build_share_text(person: &PersonRecord) -> String {
    format!("Happy Birthday {} ({})! 🎉", person.name, person.program)
}

/// File name used when saving a person's photo
pub fn build_photo_file_name(person: &PersonRecord) -> String {
    format!("HBD-{}.jpg", sanitize_file_stem(&person.name))
}

/// Render pagination dots, the active one first-class.
/// Returns `None` when there is nothing to paginate.
pub fn format_pagination(current: usize, total: usize) -> Option<String> {
    if total <= 1 {
        return None;
    }

    Some(
        (0..total)
            .map(|idx| if idx == current { "●" } else { "○" })
            .collect::<Vec<_>>()
            .join(" "),
    )
}

/// Render a text card for one person
pub fn format_card(person: &PersonRecord, current: usize, total: usize) -> String {
    let photo = if person.has_photo() { "[photo]" } else { "No Photo" };

    let mut lines = vec![
        "Today's Birthday".to_string(),
        CARD_HEADER.to_string(),
        format!("{} ({})", photo, person.age),
        person.name.clone(),
        person.program.to_uppercase(),
        format!("\"{}\"", DEFAULT_WISH),
    ];

    if let Some(dots) = format_pagination(current, total) {
        lines.push(dots);
    }

    lines.join("\n")
}

/// Render the empty state
pub fn format_empty_state() -> String {
    format!("{}\n{}", EMPTY_TITLE, EMPTY_HINT)
}
