use super::{ReceiptDocument, PrintMode};
use crate::{
    PrinterProfile,
    command::Font,
    instruction::{Instruction, Justification}
};

/// Columns assumed when the profile knows nothing about the font in use
const FALLBACK_COLUMNS: u8 = 32;

impl ReceiptDocument {
    /// Renders the document as plain text, roughly as the printer would lay it out
    ///
    /// Lines are wrapped at the column count of the active font, divided by the horizontal scale, and aligned accordingly. Pictures and codes show up as bracketed placeholders, and cuts as a dashed line. Every line ends with a new line.
    ///
    /// ```rust
    /// use escpos_receipt::{ReceiptDocument, Justification, PrinterProfile};
    ///
    /// let profile = PrinterProfile::builder().with_width(384).build();
    /// let mut document = ReceiptDocument::new();
    /// document.align(Justification::Right).line("TOTAL: 10.00");
    ///
    /// assert_eq!(format!("{:>32}\n", "TOTAL: 10.00"), document.preview(&profile));
    /// ```
    pub fn preview(&self, printer_profile: &PrinterProfile) -> String {
        let mut preview = Preview {
            printer_profile,
            lines: Vec::new(),
            pending: String::new(),
            pending_mode: None
        };

        for step in &self.steps {
            match step.instruction() {
                Instruction::Text{content} => preview.text(content, step.mode()),
                Instruction::Feed{lines} => {
                    for _ in 0..*lines {
                        preview.flush(step.mode());
                    }
                },
                Instruction::Image{bitmap, ..} => {
                    preview.block(format!("[image {}x{}]", bitmap.width(), bitmap.height()), step.mode());
                },
                Instruction::LinearBarcode{data, symbology, ..} => {
                    preview.block(format!("[{:?}: {}]", symbology, data), step.mode());
                },
                Instruction::QrCode{data, ..} => preview.block(format!("[QR: {}]", data), step.mode()),
                Instruction::Pdf417{data, ..} => preview.block(format!("[PDF417: {}]", data), step.mode()),
                Instruction::Cut => {
                    let columns = preview.columns(&PrintMode::default());
                    preview.block(format!("{:-^1$}", " cut ", columns), PrintMode::default());
                },
                _ => ()
            }
        }

        // Text that never got a feed still shows up
        if !preview.pending.is_empty() {
            preview.flush(PrintMode::default());
        }

        preview.lines.into_iter().map(|line| line + "\n").collect()
    }
}

struct Preview<'a> {
    printer_profile: &'a PrinterProfile,
    lines: Vec<String>,
    /// Text waiting for a line feed
    pending: String,
    /// Mode of the first text of the pending line, the printer lays out a whole line with it
    pending_mode: Option<PrintMode>
}

impl<'a> Preview<'a> {
    fn columns(&self, mode: &PrintMode) -> usize {
        let columns = self.printer_profile.columns(mode.font)
            .or_else(|| self.printer_profile.columns(Font::FontA))
            .unwrap_or(FALLBACK_COLUMNS);
        ((columns / (mode.width + 1)) as usize).max(1)
    }

    fn text(&mut self, content: &str, mode: PrintMode) {
        let mut parts = content.split('\n').peekable();
        while let Some(part) = parts.next() {
            if self.pending_mode.is_none() {
                self.pending_mode = Some(mode);
            }
            self.pending += part;
            if parts.peek().is_some() {
                self.flush(mode);
            }
        }
    }

    // Prints the pending line, an empty one ends up as a blank line
    fn flush(&mut self, mode: PrintMode) {
        let mode = self.pending_mode.take().unwrap_or(mode);
        let pending = std::mem::take(&mut self.pending);
        self.push_justified(&pending, &mode);
    }

    // Pictures and codes always start on their own line
    fn block(&mut self, content: String, mode: PrintMode) {
        if !self.pending.is_empty() {
            self.flush(mode);
        }
        self.push_justified(&content, &mode);
    }

    fn push_justified(&mut self, content: &str, mode: &PrintMode) {
        let columns = self.columns(mode);
        let chars: Vec<char> = content.chars().collect();
        if chars.is_empty() {
            self.lines.push(String::new());
            return;
        }
        for chunk in chars.chunks(columns) {
            let chunk: String = chunk.iter().collect();
            let line = match mode.justification {
                Justification::Left => chunk,
                Justification::Center => format!("{:^1$}", chunk.trim_end(), columns).trim_end().to_string(),
                Justification::Right => format!("{:>1$}", chunk, columns)
            };
            self.lines.push(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::TextStyle;

    #[test]
    fn centered_text_is_padded_on_the_left() {
        let mut document = ReceiptDocument::new();
        document.align(Justification::Center).line("Hi");
        assert_eq!(format!("{}Hi\n", " ".repeat(15)), document.preview(&PrinterProfile::default()));
    }

    #[test]
    fn feeds_add_blank_lines() {
        let mut document = ReceiptDocument::new();
        document.text("a").feed(3).line("b");
        assert_eq!("a\n\n\nb\n", document.preview(&PrinterProfile::default()));
    }

    #[test]
    fn long_lines_wrap_at_the_font_width() {
        let mut document = ReceiptDocument::new();
        document.line("x".repeat(40));
        assert_eq!(format!("{}\n{}\n", "x".repeat(32), "x".repeat(8)), document.preview(&PrinterProfile::default()));
    }

    #[test]
    fn wide_characters_halve_the_columns() {
        let mut document = ReceiptDocument::new();
        document.size(1, 1).align(Justification::Right).line("ab");
        assert_eq!(format!("{:>16}\n", "ab"), document.preview(&PrinterProfile::default()));
    }

    #[test]
    fn line_keeps_the_mode_of_its_first_text() {
        let mut document = ReceiptDocument::new();
        document
            .align(Justification::Right)
            .text("a")
            .align(Justification::Left)
            .style(TextStyle::bold())
            .text("b")
            .feed(1);
        assert_eq!(format!("{:>32}\n", "ab"), document.preview(&PrinterProfile::default()));
    }

    #[test]
    fn cut_is_a_dashed_line() {
        let mut document = ReceiptDocument::new();
        document.text("bye").cut();
        let preview = document.preview(&PrinterProfile::default());
        assert_eq!(format!("bye\n{:-^32}\n", " cut "), preview);
    }
}
