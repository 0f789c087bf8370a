use serde::{Serialize, Deserialize};

use crate::{
    Error, ReceiptDocument,
    command::{Font, QrOptions},
    instruction::{Instruction, Justification, TextStyle, Style}
};

/// Content of a printer test page
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TestPage {
    pub title: String,
    /// Printed right under the title divider
    pub subtitle: Option<String>,
    /// Left aligned lines, like the date or the device name
    pub details: Vec<String>,
    /// Data of a centered qr code, none to skip it
    pub qr_data: Option<String>,
    pub qr_caption: Option<String>,
    pub closing: String
}

impl Default for TestPage {
    fn default() -> TestPage {
        TestPage {
            title: "Thermal Printer Test".to_string(),
            subtitle: None,
            details: Vec::new(),
            qr_data: None,
            qr_caption: None,
            closing: "Test completed successfully!".to_string()
        }
    }
}

impl ReceiptDocument {
    /// Lays out a test page, to check that the printer works
    ///
    /// Fails if the qr code data cannot be encoded.
    ///
    /// ```rust
    /// use escpos_receipt::{ReceiptDocument, TestPage, PrinterProfile};
    ///
    /// let test_page = TestPage {
    ///     details: vec!["Device: USB Thermal Printer".to_string()],
    ///     qr_data: Some("https://example.com".to_string()),
    ///     ..Default::default()
    /// };
    /// let mut document = ReceiptDocument::new();
    /// document.render_test_page(&test_page).unwrap();
    /// assert!(document.compile(&PrinterProfile::default()).is_ok());
    /// ```
    pub fn render_test_page(&mut self, test_page: &TestPage) -> Result<&mut ReceiptDocument, Error> {
        self
            .font(Font::FontA)
            .align(Justification::Center)
            .style(TextStyle::from_styles(&[Style::Bold, Style::Underline]))
            .size(1, 1)
            .line(test_page.title.as_str())
            .style(TextStyle::plain())
            .size(0, 0)
            .line("-".repeat(24));
        if let Some(subtitle) = &test_page.subtitle {
            self.line(subtitle.as_str());
        }
        self.feed(1);

        if !test_page.details.is_empty() {
            self.align(Justification::Left);
            for detail in &test_page.details {
                self.line(detail.as_str());
            }
            self.feed(1);
        }

        self.align(Justification::Center);
        if let Some(qr_data) = &test_page.qr_data {
            self.append(Instruction::qr_code(qr_data.as_str(), QrOptions::default()))?;
            if let Some(caption) = &test_page.qr_caption {
                self.line(caption.as_str());
            }
            self.feed(1);
        }

        Ok(self
            .line(test_page.closing.as_str())
            .cut())
    }
}
