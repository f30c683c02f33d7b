// Text extraction from uploaded documents.
// PDF is the only accepted format; the parser itself is pdf-extract.

pub mod pdf;
