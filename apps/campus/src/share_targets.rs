use std::io::Write;

use anyhow::{Context, Result};
use arboard::Clipboard;
use events_core::share::{share_with_fallback, ShareLink, ShareTarget};

pub struct ClipboardTarget;

impl ShareTarget for ClipboardTarget {
    fn name(&self) -> &'static str {
        "clipboard"
    }

    fn share(&mut self, link: &ShareLink) -> Result<()> {
        let mut clipboard = Clipboard::new().context("system clipboard unavailable")?;
        clipboard
            .set_text(link.url.to_string())
            .context("failed to copy link to clipboard")?;
        println!("Link copied to clipboard!");
        Ok(())
    }
}

/// Last resort: print the link for the user to copy by hand.
pub struct PrintTarget<W: Write> {
    out: W,
}

impl<W: Write> PrintTarget<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ShareTarget for PrintTarget<W> {
    fn name(&self) -> &'static str {
        "print"
    }

    fn share(&mut self, link: &ShareLink) -> Result<()> {
        writeln!(self.out, "{}\n{}", link.text, link.url)?;
        Ok(())
    }
}

pub fn share(link: &ShareLink) {
    let mut clipboard = ClipboardTarget;
    let mut print = PrintTarget::new(std::io::stdout());
    if share_with_fallback(link, &mut [&mut clipboard, &mut print]).is_none() {
        tracing::warn!(url = %link.url, "could not share event link");
    }
}
