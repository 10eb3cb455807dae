use chatpdf_core::{AppViewModel, ChatMessage, LoginMode, Route, UploadStatus};
use chatpdf_engine::MarkdownRenderer;

const SIGNED_OUT: &str =
    "You need to be signed in to access this page. Use /signin or /register.";
const HELP_SUFFIX: &str = "If this happens repeatedly, please contact us for help";
const NO_DOCUMENT: &str =
    "No document uploaded yet; answers come from general knowledge. Use /upload <path>.";
const UPLOADED: &str = "File Uploaded! Your file is ready, and you can start chatting \
                        with ChatPDF right away! (/chat, /dismiss)";

/// Lines to print when moving from `prev` to `next`.
pub fn render(
    prev: &AppViewModel,
    next: &AppViewModel,
    markdown: &dyn MarkdownRenderer,
) -> Vec<String> {
    let mut lines = Vec::new();

    if prev.signed_in != next.signed_in {
        lines.push(if next.signed_in {
            "Signed in.".to_string()
        } else {
            "Signed out.".to_string()
        });
    }

    if prev.route != next.route {
        lines.extend(page(next));
    } else if next.route == Route::Login && prev.login.mode != next.login.mode {
        lines.push(login_title(next.login.mode).to_string());
    }

    lines.extend(render_chat(prev, next, markdown));
    lines.extend(render_upload(prev, next));

    if next.login.pending && !prev.login.pending {
        lines.push("Processing...".to_string());
    }
    if let Some(error) = next.login.error.as_deref() {
        let changed = prev.login.error.as_deref() != Some(error);
        if changed || (prev.login.pending && !next.login.pending) {
            lines.push(format!("! {error}"));
        }
    }

    lines
}

/// Header printed on entering a page.
pub fn page(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![String::new(), format!("== ChatPDF {} ==", view.route.path())];
    if view.nav_bar {
        lines.push("[/chat] [/upload] [/about]".to_string());
    }
    match view.route {
        Route::Home => {
            lines.push(
                "Chat with any document. Upload a PDF, TXT, DOCX or PPTX and ask away.".to_string(),
            );
            lines.push("Type /login to get started or /help for commands.".to_string());
        }
        Route::Login => lines.push(login_title(view.login.mode).to_string()),
        Route::Chat if !view.signed_in => lines.push(SIGNED_OUT.to_string()),
        Route::Chat => {
            if view.chat.transcript.is_empty() {
                lines.push(
                    "Clear and precise. Personalized answers. Increased efficiency.".to_string(),
                );
                lines.push("Example: \"Explain quantum computing in simple terms\"".to_string());
            }
            if !view.document_provided {
                lines.push(NO_DOCUMENT.to_string());
            }
        }
        Route::Upload if !view.signed_in => lines.push(SIGNED_OUT.to_string()),
        Route::Upload => lines.push("Upload a file with /upload <path>.".to_string()),
        Route::About => {
            lines.push("ChatPDF answers questions about the document you upload.".to_string());
            lines.push("Feedback: chatpdf.feedback@gmail.com".to_string());
        }
    }
    lines
}

fn render_chat(
    prev: &AppViewModel,
    next: &AppViewModel,
    markdown: &dyn MarkdownRenderer,
) -> Vec<String> {
    let mut lines = Vec::new();
    let (prev_chat, chat) = (&prev.chat, &next.chat);

    // A new generation means the old transcript is gone; everything in the new one is unseen.
    let already_shown = if prev_chat.generation == chat.generation {
        prev_chat.transcript.len()
    } else {
        0
    };
    for message in chat.transcript.iter().skip(already_shown) {
        lines.push(format_message(message, markdown));
    }

    if chat.pending && !prev_chat.pending {
        lines.push("... thinking".to_string());
    }
    if chat.queued > prev_chat.queued {
        lines.push(format!("(queued, {} waiting)", chat.queued));
    }
    if let Some(error) = chat.error.as_deref() {
        if prev_chat.error.as_deref() != Some(error) {
            lines.push(format!("Oops! {error}\n  {HELP_SUFFIX}. (/dismiss)"));
        }
    }
    lines
}

fn render_upload(prev: &AppViewModel, next: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    let (prev_upload, upload) = (&prev.upload, &next.upload);

    if upload.pending && !prev_upload.pending {
        let name = upload.file_name.as_deref().unwrap_or("file");
        lines.push(format!("Loading your file ({name}), please wait"));
    }
    if upload.status != prev_upload.status {
        match upload.status {
            UploadStatus::Success => lines.push(UPLOADED.to_string()),
            UploadStatus::Error => {
                let error = upload.error.as_deref().unwrap_or_default();
                lines.push(format!("Oops! {error}\n  {HELP_SUFFIX}. (/dismiss)"));
            }
            UploadStatus::None => {}
        }
    }
    lines
}

fn format_message(message: &ChatMessage, markdown: &dyn MarkdownRenderer) -> String {
    if message.is_response {
        format!("chatpdf:\n{}", indent(&markdown.render(&message.content)))
    } else {
        format!("you: {}", message.content)
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn login_title(mode: LoginMode) -> &'static str {
    match mode {
        LoginMode::SignIn => "Welcome Back. /signin <email or username> <password>",
        LoginMode::Register => {
            "Create Account. /register <username> <email> <password> <confirm>"
        }
    }
}
