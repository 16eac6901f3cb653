//! Prompt templates

use crate::types::{ChatPrompt, ExtractedContent, MediaType};

/// Role-setting preamble shared by every answer prompt
pub const ROLE_PREAMBLE: &str = "คุณเป็นผู้ช่วยตอบคำถามสำหรับคณะวิศวกรรมศาสตร์ มหาวิทยาลัยขอนแก่น";

/// Stand-in for the user message when only a file was sent
pub const FILE_ONLY_PLACEHOLDER: &str = "(ไม่มีข้อความ, ผู้ใช้ส่งเฉพาะไฟล์)";

/// Vision prompt used when no question accompanies an image
pub const DESCRIBE_IMAGE_PROMPT: &str = "อธิบายเนื้อหาภาพนี้อย่างละเอียด";

/// Prompt builder
pub struct PromptBuilder;

impl PromptBuilder {
    /// Prompt for `/chat`: instructions and message in one text part, with
    /// extracted text appended to it or an image attached as a second part
    pub fn build_chat_prompt(message: &str, file: Option<&ExtractedContent>) -> ChatPrompt {
        let message = if message.trim().is_empty() {
            FILE_ONLY_PLACEHOLDER
        } else {
            message
        };

        let mut text = [
            ROLE_PREAMBLE,
            "กรุณาตอบคำถามต่อไปนี้อย่างถูกต้องและกระชับ:",
            "",
            "คำถามหรือข้อความจากผู้ใช้:",
            message,
            "",
            "คำตอบ:",
        ]
        .join("\n");

        match file {
            Some(ExtractedContent::Text {
                media_type,
                content,
            }) => {
                text.push_str("\n\nเนื้อหาไฟล์ที่อัปโหลด:\n");
                text.push_str(Self::content_label(*media_type));
                text.push('\n');
                text.push_str(content);
                ChatPrompt::new().text(text)
            }
            Some(ExtractedContent::Image { data, mime_type }) => {
                ChatPrompt::new().text(text).inline_data(mime_type, data)
            }
            None => ChatPrompt::new().text(text),
        }
    }

    /// Prompt for `/ask`: preamble, instruction, question and reference context
    pub fn build_ask_prompt(question: &str, context: &str) -> ChatPrompt {
        ChatPrompt::new()
            .text(ROLE_PREAMBLE)
            .text("กรุณาตอบคำถามต่อไปนี้โดยอ้างอิงจากข้อมูลด้านล่าง:")
            .text(format!("คำถาม: {}", question))
            .text(format!("ข้อมูลอ้างอิง:\n{}", context))
    }

    /// Vision prompt, optionally steered by a question
    pub fn build_vision_prompt(question: Option<&str>, mime_type: &str, data: &str) -> ChatPrompt {
        let instruction = match question.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => format!("จากภาพนี้: {} (ตอบอย่างละเอียดและถูกต้อง)", q),
            None => DESCRIBE_IMAGE_PROMPT.to_string(),
        };

        ChatPrompt::new().text(instruction).inline_data(mime_type, data)
    }

    fn content_label(media_type: MediaType) -> &'static str {
        match media_type {
            MediaType::Pdf => "เนื้อหา PDF:",
            MediaType::Docx => "เนื้อหาเอกสาร:",
            _ => "เนื้อหาไฟล์:",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PromptPart;

    fn first_text(prompt: &ChatPrompt) -> &str {
        match &prompt.parts()[0] {
            PromptPart::Text(t) => t,
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_chat_prompt_message_only() {
        let prompt = PromptBuilder::build_chat_prompt("ค่าเทอมเท่าไหร่", None);
        assert_eq!(prompt.parts().len(), 1);
        let text = first_text(&prompt);
        assert!(text.starts_with(ROLE_PREAMBLE));
        assert!(text.contains("\nค่าเทอมเท่าไหร่\n"));
        assert!(text.ends_with("คำตอบ:"));
    }

    #[test]
    fn test_chat_prompt_file_only_placeholder() {
        let image = ExtractedContent::Image {
            data: "AAAA".to_string(),
            mime_type: "image/png".to_string(),
        };
        let prompt = PromptBuilder::build_chat_prompt("", Some(&image));
        assert_eq!(prompt.parts().len(), 2);
        assert!(first_text(&prompt).contains(FILE_ONLY_PLACEHOLDER));
        assert_eq!(
            prompt.parts()[1],
            PromptPart::InlineData {
                mime_type: "image/png".to_string(),
                data: "AAAA".to_string(),
            }
        );
    }

    #[test]
    fn test_chat_prompt_appends_document_text() {
        let doc = ExtractedContent::Text {
            media_type: MediaType::Pdf,
            content: "Semester starts in June".to_string(),
        };
        let prompt = PromptBuilder::build_chat_prompt("when?", Some(&doc));
        assert_eq!(prompt.parts().len(), 1);
        assert!(first_text(&prompt)
            .ends_with("เนื้อหาไฟล์ที่อัปโหลด:\nเนื้อหา PDF:\nSemester starts in June"));
    }

    #[test]
    fn test_ask_prompt_has_four_parts() {
        let prompt = PromptBuilder::build_ask_prompt("Where is the office?", "ctx");
        let parts = prompt.parts();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], PromptPart::Text(ROLE_PREAMBLE.to_string()));
        assert_eq!(parts[2], PromptPart::Text("คำถาม: Where is the office?".to_string()));
        assert_eq!(parts[3], PromptPart::Text("ข้อมูลอ้างอิง:\nctx".to_string()));
    }

    #[test]
    fn test_vision_prompt() {
        let generic = PromptBuilder::build_vision_prompt(None, "image/jpeg", "AAAA");
        assert_eq!(first_text(&generic), DESCRIBE_IMAGE_PROMPT);

        let blank = PromptBuilder::build_vision_prompt(Some("  "), "image/jpeg", "AAAA");
        assert_eq!(first_text(&blank), DESCRIBE_IMAGE_PROMPT);

        let steered = PromptBuilder::build_vision_prompt(Some("how much?"), "image/jpeg", "AAAA");
        assert_eq!(
            first_text(&steered),
            "จากภาพนี้: how much? (ตอบอย่างละเอียดและถูกต้อง)"
        );
        assert_eq!(steered.parts().len(), 2);
    }
}
