use crate::models::{ResumeRecord, TemplateVariant};

/// `Jane  Doe` -> `Jane_Doe`. Every whitespace run becomes one underscore,
/// leading and trailing runs included.
pub fn name_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
        } else {
            stem.push(c);
            in_space = false;
        }
    }
    stem
}

/// `<Name>_Resume.txt`
pub fn text_file_name(record: &ResumeRecord) -> String {
    format!("{}_Resume.txt", name_stem(&record.contact.name))
}

/// `<Name>_Resume_<variant>.<extension>`
pub fn variant_file_name(record: &ResumeRecord, variant: TemplateVariant, extension: &str) -> String {
    format!(
        "{}_Resume_{}.{}",
        name_stem(&record.contact.name),
        variant,
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::fixtures::jane_doe;

    #[test]
    fn test_jane_doe_file_names() {
        let record = jane_doe();
        assert_eq!(
            variant_file_name(&record, TemplateVariant::Modern, "pdf"),
            "Jane_Doe_Resume_modern.pdf"
        );
        assert_eq!(
            variant_file_name(&record, TemplateVariant::Modern, "docx"),
            "Jane_Doe_Resume_modern.docx"
        );
        assert_eq!(text_file_name(&record), "Jane_Doe_Resume.txt");
    }

    #[test]
    fn test_whitespace_runs_collapse_to_one_underscore() {
        assert_eq!(name_stem("Mary  Ann\tLee"), "Mary_Ann_Lee");
        assert_eq!(name_stem(" Jane Doe"), "_Jane_Doe");
        assert_eq!(name_stem("Cher"), "Cher");
    }
}
