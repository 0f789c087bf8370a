use codepage_437::CP437_CONTROL;
use log::warn;

use super::{ReceiptDocument, PrintMode};
use crate::{
    Error, PrinterProfile, CommandBuffer,
    command::{self, Command, Density},
    instruction::{Instruction, Bitmap}
};

/// `ESC t` table matching the text encoder
const CODE_PAGE_437: u8 = 0x00;

impl ReceiptDocument {
    /// Compiles the document into esc/pos bytes for the given printer
    ///
    /// The stream starts by initializing the printer and selecting code page 437. Mode changes (alignment, style, font, size) are only sent when they differ from what the printer already has. The same document and profile always produce the same bytes.
    ///
    /// Fails with [UnsupportedInstruction](crate::Error::UnsupportedInstruction) when the profile cannot print one of the steps: a font the printer lacks, italics, pdf417 codes, or a picture wider than the paper.
    pub fn compile(&self, printer_profile: &PrinterProfile) -> Result<CommandBuffer, Error> {
        let mut target = Vec::new();
        target.append(&mut Command::Initialize.as_bytes());
        target.append(&mut Command::SelectCodeTable{code_table: CODE_PAGE_437}.as_bytes());

        // Right after ESC @ the printer is in the default mode
        let mut printer_mode = PrintMode::default();
        let mut replaced = 0;
        for step in &self.steps {
            switch_mode(&printer_mode, &step.mode, printer_profile, &mut target)?;
            printer_mode = step.mode;

            match &step.instruction {
                Instruction::Text{content} => {
                    replaced += encode_text(content, &mut target);
                },
                Instruction::Feed{lines} => {
                    if *lines > 0 {
                        target.append(&mut Command::FeedLines{lines: *lines}.as_bytes());
                    }
                },
                // Already sent by switch_mode
                Instruction::Align{..} | Instruction::Style{..} | Instruction::Font{..} | Instruction::Size{..} => (),
                Instruction::Image{bitmap, density} => {
                    if bitmap.width() > density.max_columns(printer_profile.width()) {
                        return Err(Error::UnsupportedInstruction(format!(
                            "picture is {} columns wide at {:?}, the printer only fits {}",
                            bitmap.width(), density, density.max_columns(printer_profile.width())
                        )));
                    }
                    target.append(&mut bitmap.feed(*density));
                },
                Instruction::LinearBarcode{data, symbology, options} => {
                    target.append(&mut command::linear_barcode(data, *symbology, options));
                },
                Instruction::QrCode{data, options} => {
                    if printer_profile.native_qr() {
                        target.append(&mut command::qr_code(data, options));
                    } else {
                        // The module size shrinks until the symbol fits the paper
                        let unit = Bitmap::from_qr(data, options.error_correction, 1)?;
                        let module_size = (options.module_size as u16).min(printer_profile.width() / unit.width());
                        if module_size == 0 {
                            return Err(Error::UnsupportedInstruction(format!(
                                "qr code needs {} dots, the printer only has {}", unit.width(), printer_profile.width()
                            )));
                        }
                        let bitmap = Bitmap::from_qr(data, options.error_correction, module_size)?;
                        target.append(&mut bitmap.feed(Density::TwentyfourDotDoubleDensity));
                    }
                },
                Instruction::Pdf417{data, options} => {
                    if !printer_profile.pdf417() {
                        return Err(Error::UnsupportedInstruction("the printer cannot print pdf417 codes".to_string()));
                    }
                    target.append(&mut command::pdf417(data, options));
                },
                Instruction::Cut => {
                    target.append(&mut Command::Cut.as_bytes());
                }
            }
        }

        if replaced > 0 {
            warn!("{} characters have no code page 437 equivalent and were printed as '?'", replaced);
        }

        Ok(CommandBuffer::new(target))
    }
}

// Sends the commands that take the printer from one mode to the other
fn switch_mode(from: &PrintMode, to: &PrintMode, printer_profile: &PrinterProfile, target: &mut Vec<u8>) -> Result<(), Error> {
    if from.font != to.font {
        if printer_profile.columns(to.font).is_none() {
            return Err(Error::UnsupportedInstruction(format!("{:?} is not available on the printer", to.font)));
        }
        target.append(&mut Command::SelectFont{font: to.font}.as_bytes());
    }
    if from.justification != to.justification {
        target.append(&mut Command::SelectJustification{justification: to.justification}.as_bytes());
    }
    if from.style.bold != to.style.bold {
        let command = if to.style.bold { Command::BoldOn } else { Command::BoldOff };
        target.append(&mut command.as_bytes());
    }
    if from.style.underline != to.style.underline {
        let command = if to.style.underline { Command::Underline1Dot } else { Command::UnderlineOff };
        target.append(&mut command.as_bytes());
    }
    if from.style.italic != to.style.italic {
        if !printer_profile.italic() {
            return Err(Error::UnsupportedInstruction("the printer has no italics".to_string()));
        }
        let command = if to.style.italic { Command::ItalicOn } else { Command::ItalicOff };
        target.append(&mut command.as_bytes());
    }
    if (from.width, from.height) != (to.width, to.height) {
        target.append(&mut Command::CharacterSize{width: to.width, height: to.height}.as_bytes());
    }
    Ok(())
}

// Returns how many characters had to be replaced
fn encode_text(content: &str, target: &mut Vec<u8>) -> usize {
    let mut replaced = 0;
    for c in content.chars() {
        match CP437_CONTROL.encode(c) {
            Some(byte) => target.push(byte),
            None => {
                replaced += 1;
                target.push(b'?');
            }
        }
    }
    replaced
}
