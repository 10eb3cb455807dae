//! Markdown rendering for backend answers.

use pulldown_cmark::{html, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Markdown to an HTML fragment.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl MarkdownRenderer for HtmlRenderer {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, parser_options());
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

/// Markdown to plain text for a terminal: headings are underlined, list
/// markers and code indentation are kept, emphasis markers are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalRenderer;

impl MarkdownRenderer for TerminalRenderer {
    fn render(&self, markdown: &str) -> String {
        let mut out = String::new();
        // One entry per open list; `Some(n)` is the next number of an ordered list.
        let mut lists: Vec<Option<u64>> = Vec::new();
        let mut heading: Option<(HeadingLevel, usize)> = None;
        let mut links: Vec<String> = Vec::new();
        let mut in_code_block = false;

        for event in Parser::new_ext(markdown, parser_options()) {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    ensure_blank_line(&mut out);
                    heading = Some((level, out.len()));
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, start)) = heading.take() {
                        let width = out[start..].chars().count();
                        let rule = if level == HeadingLevel::H1 { '=' } else { '-' };
                        out.push('\n');
                        out.extend(std::iter::repeat_n(rule, width));
                        out.push_str("\n\n");
                    }
                }
                Event::End(TagEnd::Paragraph) => {
                    if lists.is_empty() {
                        ensure_blank_line(&mut out);
                    } else {
                        ensure_newline(&mut out);
                    }
                }
                Event::Start(Tag::List(first)) => {
                    ensure_newline(&mut out);
                    lists.push(first);
                }
                Event::End(TagEnd::List(_)) => {
                    lists.pop();
                    if lists.is_empty() {
                        ensure_blank_line(&mut out);
                    }
                }
                Event::Start(Tag::Item) => {
                    ensure_newline(&mut out);
                    out.push_str(&"  ".repeat(lists.len().saturating_sub(1)));
                    match lists.last_mut() {
                        Some(Some(number)) => {
                            out.push_str(&format!("{number}. "));
                            *number += 1;
                        }
                        _ => out.push_str("- "),
                    }
                }
                Event::End(TagEnd::Item) => ensure_newline(&mut out),
                Event::Start(Tag::CodeBlock(kind)) => {
                    ensure_newline(&mut out);
                    if let CodeBlockKind::Fenced(lang) = kind {
                        if !lang.is_empty() {
                            out.push_str(&format!("    [{lang}]\n"));
                        }
                    }
                    in_code_block = true;
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    ensure_blank_line(&mut out);
                }
                Event::Start(Tag::Link { dest_url, .. }) => links.push(dest_url.to_string()),
                Event::End(TagEnd::Link) => {
                    if let Some(url) = links.pop() {
                        out.push_str(&format!(" ({url})"));
                    }
                }
                Event::End(TagEnd::TableCell) => out.push_str(" | "),
                Event::End(TagEnd::TableHead | TagEnd::TableRow) => {
                    let trimmed = out.trim_end_matches(" | ").len();
                    out.truncate(trimmed);
                    out.push('\n');
                }
                Event::End(TagEnd::Table) => ensure_blank_line(&mut out),
                Event::Text(text) if in_code_block => {
                    for line in text.lines() {
                        out.push_str("    ");
                        out.push_str(line);
                        out.push('\n');
                    }
                }
                Event::Text(text) => out.push_str(&text),
                Event::Code(code) => {
                    out.push('`');
                    out.push_str(&code);
                    out.push('`');
                }
                Event::SoftBreak => out.push(' '),
                Event::HardBreak => out.push('\n'),
                Event::Rule => {
                    ensure_newline(&mut out);
                    out.push_str("----\n\n");
                }
                _ => {}
            }
        }

        out.trim_end().to_string()
    }
}

fn ensure_newline(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn ensure_blank_line(out: &mut String) {
    ensure_newline(out);
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push('\n');
    }
}
