/// Teacher identifier. Opaque, case-sensitive, usually an email address.
pub type TeacherId = String;

/// Student identifier. Opaque, case-sensitive, usually an email address.
pub type StudentId = String;
