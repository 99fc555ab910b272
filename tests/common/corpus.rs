use flowpage::{Alignment, Document, StyleDecoration, StyleLength};

const LEXICON: &[&str] = &[
    "the", "of", "and", "a", "to", "in", "was", "her", "letter", "carriage",
    "morning", "gentleman", "considerable", "acquaintance", "whatever", "never",
    "understanding", "neighbourhood", "she", "said", "with", "little", "uncomfortable",
    "circumstances", "walked", "towards", "house", "immediately", "perhaps", "quite",
];

/// Deterministic pseudo-random word source.
pub struct Prose {
    state: u64,
}

impl Prose {
    pub fn new(seed: u64) -> Self {
        Self { state: seed | 1 }
    }

    fn next(&mut self) -> usize {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        (self.state >> 11) as usize
    }

    pub fn sentence(&mut self, words: usize) -> String {
        let mut out = String::new();
        for index in 0..words {
            if index > 0 {
                out.push(' ');
            }
            out.push_str(LEXICON[self.next() % LEXICON.len()]);
        }
        out.push('.');
        out
    }

    pub fn paragraph_len(&mut self) -> usize {
        15 + self.next() % 70
    }
}

/// A novel-like document: `chapters` sections of `paragraphs` paragraphs,
/// each chapter opened by a centered, spaced heading.
pub fn novel(chapters: usize, paragraphs: usize, seed: u64) -> Document {
    let mut prose = Prose::new(seed);
    let mut builder = Document::builder();
    for chapter in 0..chapters {
        builder = builder
            .paragraph()
            .push_style(StyleDecoration {
                font_scale: Some(1.5),
                bold: Some(true),
                alignment: Some(Alignment::Center),
                space_after: Some(StyleLength::Px(12)),
                allow_hyphenation: Some(false),
                ..StyleDecoration::default()
            })
            .text(&format!("Chapter {}", chapter + 1));
        for _ in 0..paragraphs {
            let words = prose.paragraph_len();
            builder = builder
                .paragraph()
                .push_style(StyleDecoration {
                    first_line_indent: Some(StyleLength::Em(1.0)),
                    ..StyleDecoration::default()
                })
                .text(&prose.sentence(words))
                .pop_style();
        }
        builder = builder.end_section();
    }
    builder.build()
}
