//! `$DWGCODEPAGE` names and their `encoding_rs` encodings
//!
//! Files older than R2007 store non-ASCII text in the code page named by the
//! header. From R2007 on text is UTF-8 and the variable is informational.

use crate::types::DxfVersion;
use encoding_rs::Encoding;

/// Code page written when the caller did not pick one.
pub const DEFAULT_CODE_PAGE: &str = "ANSI_1252";

fn code_pages() -> [(&'static str, &'static Encoding); 20] {
    [
        ("ANSI_874", encoding_rs::WINDOWS_874),
        ("ANSI_932", encoding_rs::SHIFT_JIS),
        ("ANSI_936", encoding_rs::GBK),
        ("ANSI_949", encoding_rs::EUC_KR),
        ("ANSI_950", encoding_rs::BIG5),
        ("ANSI_1250", encoding_rs::WINDOWS_1250),
        ("ANSI_1251", encoding_rs::WINDOWS_1251),
        ("ANSI_1252", encoding_rs::WINDOWS_1252),
        ("ANSI_1253", encoding_rs::WINDOWS_1253),
        ("ANSI_1254", encoding_rs::WINDOWS_1254),
        ("ANSI_1255", encoding_rs::WINDOWS_1255),
        ("ANSI_1256", encoding_rs::WINDOWS_1256),
        ("ANSI_1257", encoding_rs::WINDOWS_1257),
        ("ANSI_1258", encoding_rs::WINDOWS_1258),
        ("DOS866", encoding_rs::IBM866),
        ("ISO8859-2", encoding_rs::ISO_8859_2),
        ("ISO8859-5", encoding_rs::ISO_8859_5),
        ("ISO8859-7", encoding_rs::ISO_8859_7),
        ("ISO8859-15", encoding_rs::ISO_8859_15),
        ("KOI8-R", encoding_rs::KOI8_R),
    ]
}

/// Encoding for a `$DWGCODEPAGE` value.
///
/// `None` means the text needs no transcoding (ASCII, UTF-8). Aliases such
/// as `GB2312` or `ISO_8859-1` are folded onto the table; anything else is
/// treated as Windows-1252.
pub fn encoding_for_code_page(code_page: &str) -> Option<&'static Encoding> {
    let name = code_page.trim().to_ascii_uppercase().replace("ISO_", "ISO");
    let name = match name.as_str() {
        "ASCII" | "UTF-8" | "UTF8" | "UNICODE" => return None,
        "GB2312" => "ANSI_936",
        "BIG5" => "ANSI_950",
        "KOREAN" | "JOHAB" => "ANSI_949",
        "ISO8859-1" | "DOS850" | "DOS437" => "ANSI_1252",
        "DOS852" => "ANSI_1250",
        "DOS855" => "DOS866",
        "DOS857" | "ISO8859-9" => "ANSI_1254",
        "DOS869" => "ANSI_1253",
        other => other,
    }
    .to_string();
    code_pages()
        .into_iter()
        .find(|(n, _)| *n == name)
        .map(|(_, enc)| enc)
        .or(Some(encoding_rs::WINDOWS_1252))
}

/// `$DWGCODEPAGE` value for an encoding, if it has one.
pub fn code_page_for_encoding(encoding: &'static Encoding) -> Option<&'static str> {
    code_pages()
        .into_iter()
        .find(|(_, enc)| *enc == encoding)
        .map(|(name, _)| name)
}

/// Whether text of `version` is decoded through `$DWGCODEPAGE`.
pub fn uses_code_page(version: DxfVersion) -> bool {
    version < DxfVersion::R2007
}
