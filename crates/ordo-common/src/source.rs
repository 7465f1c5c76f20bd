use miette::NamedSource;
use std::sync::RwLock;

/// Unique identifier for a registered source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(u32);

impl SourceId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// A single input text: a constant file or an expression supplied
/// through the builder API.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub id: SourceId,
    pub name: String,
    pub content: String,
}

impl SourceFile {
    /// Wrap this source for attachment to a miette report.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.content.clone())
    }
}

/// Registry of all source texts seen by one evaluation session.
#[derive(Debug, Default)]
pub struct SourceMap {
    files: RwLock<Vec<SourceFile>>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, name: impl Into<String>, content: String) -> SourceId {
        let mut files = self.files.write().unwrap();
        let id = SourceId(files.len() as u32);
        files.push(SourceFile {
            id,
            name: name.into(),
            content,
        });
        id
    }

    pub fn get(&self, id: SourceId) -> Option<SourceFile> {
        let files = self.files.read().unwrap();
        files.get(id.0 as usize).cloned()
    }
}
