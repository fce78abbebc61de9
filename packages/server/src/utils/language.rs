use std::borrow::Cow;

/// Display name for a judge language id.
pub fn language_name(language_id: i32) -> Cow<'static, str> {
    let name = match language_id {
        45 => "Assembly",
        46 => "Bash",
        50 | 75 => "C",
        51 => "C#",
        52 | 54 | 76 => "C++",
        60 => "Go",
        62 => "Java",
        63 => "JavaScript",
        68 => "PHP",
        70 | 71 => "Python",
        72 => "Ruby",
        73 => "Rust",
        74 => "TypeScript",
        78 => "Kotlin",
        83 => "Swift",
        _ => return Cow::Owned(format!("Language {language_id}")),
    };
    Cow::Borrowed(name)
}
