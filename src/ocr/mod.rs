//! Client for the hosted PaddleOCR layout-parsing endpoint.

use reqwest::{
    header::AUTHORIZATION,
    Client,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    MochimineError,
    SelectedImage,
};

const OCR_ENDPOINT: &str = "https://paddleocr.aistudio.baidu.com/v2/layout-parsing";

/// File-type discriminator the service expects: 0 for PDF documents,
/// 1 for plain images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Document = 0,
    Image = 1,
}

impl FileKind {
    pub fn from_media_type(media_type: &str) -> Self {
        if media_type == "application/pdf" {
            FileKind::Document
        } else {
            FileKind::Image
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OcrRequest<'a> {
    file: &'a str,
    file_type: u8,
    use_doc_orientation_classify: bool,
    use_doc_unwarping: bool,
    use_textline_orientation: bool,
}

#[derive(Deserialize)]
struct OcrResponse {
    result: OcrResult,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OcrResult {
    layout_parsing_results: Vec<PageResult>,
}

#[derive(Deserialize)]
struct PageResult {
    markdown: MarkdownBlock,
}

#[derive(Deserialize)]
struct MarkdownBlock {
    text: String,
}

/// Sends the already-encoded image to the OCR service and concatenates the
/// per-page markdown text with blank lines. A non-success status aborts with
/// the response body in the error.
pub async fn recognize(token: &str, image: &SelectedImage) -> Result<String, MochimineError> {
    let kind = FileKind::from_media_type(&image.media_type);
    let body = OcrRequest {
        file: &image.base64,
        file_type: kind as u8,
        use_doc_orientation_classify: false,
        use_doc_unwarping: false,
        use_textline_orientation: false,
    };

    let response = Client::new()
        .post(OCR_ENDPOINT)
        .header(AUTHORIZATION, format!("token {}", token))
        .json(&body)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(MochimineError::OcrService { status, body });
    }

    let parsed: OcrResponse = response.json().await?;
    let pages: Vec<&str> =
        parsed.result.layout_parsing_results.iter().map(|p| p.markdown.text.as_str()).collect();

    Ok(pages.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_is_a_document_everything_else_an_image() {
        assert_eq!(FileKind::from_media_type("application/pdf"), FileKind::Document);
        assert_eq!(FileKind::from_media_type("image/jpeg"), FileKind::Image);
        assert_eq!(FileKind::from_media_type("image/webp"), FileKind::Image);
    }

    #[test]
    fn request_body_uses_service_field_names() {
        let body = OcrRequest {
            file: "aGVsbG8=",
            file_type: FileKind::Image as u8,
            use_doc_orientation_classify: false,
            use_doc_unwarping: false,
            use_textline_orientation: false,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["file"], "aGVsbG8=");
        assert_eq!(json["fileType"], 1);
        assert_eq!(json["useDocOrientationClassify"], false);
    }

    #[test]
    fn response_pages_parse_from_service_shape() {
        let raw = r#"{
            "result": {
                "layoutParsingResults": [
                    {"markdown": {"text": "一ページ"}},
                    {"markdown": {"text": "二ページ"}}
                ]
            }
        }"#;

        let parsed: OcrResponse = serde_json::from_str(raw).unwrap();
        let pages: Vec<&str> =
            parsed.result.layout_parsing_results.iter().map(|p| p.markdown.text.as_str()).collect();
        assert_eq!(pages.join("\n\n"), "一ページ\n\n二ページ");
    }
}
