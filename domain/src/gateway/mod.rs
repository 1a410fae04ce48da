pub mod groq;
pub mod mailersend;
