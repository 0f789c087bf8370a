mod compile;
mod preview;

use serde::{Serialize};
use crate::{
    Error,
    command::Font,
    instruction::{Instruction, Justification, TextStyle}
};

/// Alignment, style, font and size in effect at some point of a document
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct PrintMode {
    pub justification: Justification,
    pub style: TextStyle,
    pub font: Font,
    /// Horizontal scale, 0 to 7
    pub width: u8,
    /// Vertical scale, 0 to 7
    pub height: u8
}

impl PrintMode {
    fn apply(&mut self, instruction: &Instruction) {
        match instruction {
            Instruction::Align{justification} => self.justification = *justification,
            Instruction::Style{style} => self.style = *style,
            Instruction::Font{font} => self.font = *font,
            Instruction::Size{width, height} => {
                self.width = *width;
                self.height = *height;
            },
            _ => ()
        }
    }
}

/// An instruction, as recorded by the document
///
/// Besides the instruction itself, each step keeps the [PrintMode](crate::PrintMode) that was active once the instruction got appended, so a step can be replayed on its own.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Step {
    instruction: Instruction,
    mode: PrintMode
}

impl Step {
    pub fn instruction(&self) -> &Instruction {
        &self.instruction
    }

    pub fn mode(&self) -> PrintMode {
        self.mode
    }
}

/// Receipt under construction
///
/// Instructions are appended in order, either through [append](ReceiptDocument::append) or through the shorthand methods, and the whole sequence is turned into esc/pos bytes with [compile](ReceiptDocument::compile).
///
/// ```rust
/// use escpos_receipt::{ReceiptDocument, Justification, TextStyle, PrinterProfile};
///
/// let mut document = ReceiptDocument::new();
/// document
///     .align(Justification::Center)
///     .style(TextStyle::bold())
///     .line("Hello, world!")
///     .feed(3)
///     .cut();
///
/// let buffer = document.compile(&PrinterProfile::default()).unwrap();
/// assert!(buffer.len() > 0);
/// ```
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct ReceiptDocument {
    steps: Vec<Step>,
    /// Mode that the next appended instruction starts from
    mode: PrintMode
}

impl ReceiptDocument {
    pub fn new() -> ReceiptDocument {
        ReceiptDocument::default()
    }

    /// Appends an instruction at the end of the document
    ///
    /// Character scales are clamped to 0..=7. Barcodes, qr codes and pdf417 codes whose data or options cannot be encoded are refused with [InvalidInstruction](crate::Error::InvalidInstruction).
    pub fn append(&mut self, instruction: Instruction) -> Result<&mut ReceiptDocument, Error> {
        let instruction = instruction.validated()?;
        Ok(self.push(instruction))
    }

    /// Appends every instruction, stopping at the first invalid one
    pub fn extend<I: IntoIterator<Item = Instruction>>(&mut self, instructions: I) -> Result<&mut ReceiptDocument, Error> {
        for instruction in instructions {
            self.append(instruction)?;
        }
        Ok(self)
    }

    // Only for instructions that need no validation
    pub(crate) fn push(&mut self, instruction: Instruction) -> &mut ReceiptDocument {
        self.mode.apply(&instruction);
        self.steps.push(Step {
            instruction,
            mode: self.mode
        });
        self
    }

    /// Raw text, without line break
    pub fn text<A: Into<String>>(&mut self, content: A) -> &mut ReceiptDocument {
        self.push(Instruction::text(content))
    }

    /// Text followed by a single line feed
    pub fn line<A: Into<String>>(&mut self, content: A) -> &mut ReceiptDocument {
        self.text(content).feed(1)
    }

    pub fn feed(&mut self, lines: u8) -> &mut ReceiptDocument {
        self.push(Instruction::feed(lines))
    }

    pub fn align(&mut self, justification: Justification) -> &mut ReceiptDocument {
        self.push(Instruction::align(justification))
    }

    pub fn style(&mut self, style: TextStyle) -> &mut ReceiptDocument {
        self.push(Instruction::style(style))
    }

    pub fn font(&mut self, font: Font) -> &mut ReceiptDocument {
        self.push(Instruction::font(font))
    }

    /// Character size, scales above 7 are clamped
    pub fn size(&mut self, width: u8, height: u8) -> &mut ReceiptDocument {
        self.push(Instruction::size(width, height))
    }

    pub fn cut(&mut self) -> &mut ReceiptDocument {
        self.push(Instruction::cut())
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.steps.iter().map(|step| &step.instruction)
    }

    /// Mode in effect at the end of the document
    pub fn mode(&self) -> PrintMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
