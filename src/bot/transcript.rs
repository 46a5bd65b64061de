//! Console transcript of received messages.

use tracing::info;

use crate::common::IncomingMessage;

/// Indent every line after the first with a tab.
pub fn tab_newlines(text: &str) -> String {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| if i == 0 { line.to_string() } else { format!("\t{}", line) })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a message as `[(edit) ][<guild>> #<channel>> ]<author>> <content>`.
pub fn format_message(message: &IncomingMessage, edit: bool) -> String {
    let content = tab_newlines(&message.content);
    let edit = if edit { "(edit) " } else { "" };

    match &message.guild {
        None => format!("{}{}> {}", edit, message.author.tag, content),
        Some(guild) => format!(
            "{}{}> #{}> {}> {}",
            edit,
            guild.name,
            message.channel.name.as_deref().unwrap_or("unknown"),
            message.author.tag,
            content
        ),
    }
}

/// Log a message line to the console.
pub fn log_message(message: &IncomingMessage, edit: bool) {
    info!("{}", format_message(message, edit));
}
