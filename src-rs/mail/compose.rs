use chrono::NaiveDate;

pub fn daily_subject(date: NaiveDate) -> String {
    format!("Daily Bible Verse - {}", date.format("%A, %B %-d, %Y"))
}

/// The quoted line of the mail. Without scripture text only the reference is quoted.
pub fn quoted_verse(reference: &str, scripture: Option<&str>) -> String {
    match scripture {
        Some(text) if !text.trim().is_empty() => format!("{} - {} [KJV]", text.trim(), reference),
        _ => format!("{} [KJV]", reference),
    }
}

pub fn daily_body(quote: &str) -> String {
    format!(
        "Hello!\n\
         \n\
         Here is your daily Bible verse, a reminder from God to not be afraid:\n\
         \n\
         \t\"{quote}\"\n\
         \n\
         ---\n\
         Sent with love from your Daily Verse app\n\
         \n\
         To stop receiving these emails, please reply to this message."
    )
}
