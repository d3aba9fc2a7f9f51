use std::path::{Path, PathBuf};

use chrono::Utc;
use gt_app::ChatPanel;
use gt_llm::LlmTransport;
use gt_render::chat::{render_message, typing_indicator};
use gt_render::render_transcript_html;

use crate::cli::root_commands::ChatArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::export::{read_report, write_file};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;
use crate::{prompt, ui};

/// What one line of input asks for.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Print,
    Skip,
    Question(&'a str),
}

fn classify(line: &str) -> Input<'_> {
    match line.trim() {
        "/quit" | "/exit" => Input::Quit,
        "/print" => Input::Print,
        "" => Input::Skip,
        question => Input::Question(question),
    }
}

/// Default transcript file name for `target`.
fn transcript_path(target: &str) -> PathBuf {
    let slug = target
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    let slug = if slug.is_empty() { "dossier".to_string() } else { slug };
    PathBuf::from(format!("{slug}-chat-log.html"))
}

pub async fn handle(args: &ChatArgs, flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    let report = read_report(&args.report)?;
    let mut panel = ChatPanel::new(ctx.chat_client()?, report, ctx.api_key()?);
    let interactive = flags.format == OutputFormat::Table;
    let width = ui::prefs().term_width.unwrap_or(80);
    let style = ui::prefs().style();

    if interactive {
        for message in panel.messages() {
            println!("{}", render_message(message, style, width));
        }
        eprintln!("{}", style.dim("/print writes the transcript, /quit leaves"));
    }

    while let Some(line) = prompt::read_line(if interactive { "> " } else { "" })? {
        match classify(&line) {
            Input::Quit => break,
            Input::Skip => {}
            Input::Print => {
                let path = args
                    .transcript
                    .clone()
                    .unwrap_or_else(|| transcript_path(&panel.report().target_name));
                print_transcript(&panel, &path, flags)?;
            }
            Input::Question(question) => {
                let spinner = Progress::spinner(&typing_indicator(style));
                let answer = panel.ask(question).await;
                spinner.finish_clear();
                match answer {
                    Ok(message) if interactive => println!("{}", render_message(message, style, width)),
                    Ok(_) => {}
                    Err(error) => eprintln!("{error}"),
                }
            }
        }
    }

    if let Some(path) = &args.transcript {
        print_transcript(&panel, path, flags)?;
    }
    if !interactive {
        output(&panel.messages(), flags.format)?;
    }
    Ok(())
}

fn print_transcript<T: LlmTransport>(panel: &ChatPanel<T>, path: &Path, flags: &GlobalFlags) -> anyhow::Result<()> {
    let html = render_transcript_html(&panel.report().target_name, panel.messages(), Utc::now());
    write_file(path, &html)?;
    if !flags.quiet {
        eprintln!("transcript written to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::{Input, classify, transcript_path};

    #[test]
    fn commands_and_questions_are_told_apart() {
        assert_eq!(classify("/quit"), Input::Quit);
        assert_eq!(classify("  /print "), Input::Print);
        assert_eq!(classify("   "), Input::Skip);
        assert_eq!(
            classify(" Who owns L'Oréal? "),
            Input::Question("Who owns L'Oréal?")
        );
    }

    #[test]
    fn transcript_name_is_slugged_from_target() {
        assert_eq!(
            transcript_path("Monsanto (Bayer)"),
            PathBuf::from("monsanto-bayer-chat-log.html")
        );
        assert_eq!(transcript_path("!!"), PathBuf::from("dossier-chat-log.html"));
    }
}
