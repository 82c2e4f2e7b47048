// Generation: raw résumé text -> structured ResumeRecord via the
// generation capability, plus the PDF text-extraction helper route.

pub mod handlers;
pub mod prompts;
pub mod transformer;
