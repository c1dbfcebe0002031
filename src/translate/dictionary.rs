use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{Result, TarjomanError};
use crate::language::{Direction, Language};
use super::normalize::{fold, normalize};

/// One phrase and its translation within a direction's table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseEntry {
    pub source: String,
    pub target: String,
}

/// Phrase table for a single direction.
///
/// Keeps insertion order, an index of case-folded keys for exact lookups and
/// the key order used by substring matching (longest first, ties in
/// insertion order).
#[derive(Debug, Clone)]
pub struct PhraseTable {
    language: Language,
    entries: Vec<PhraseEntry>,
    index: HashMap<String, usize>,
    by_length: Vec<usize>,
}

impl PhraseTable {
    fn new(language: Language) -> Self {
        Self {
            language,
            entries: Vec::new(),
            index: HashMap::new(),
            by_length: Vec::new(),
        }
    }

    /// Insert unless the folded key already exists; the first entry wins.
    /// Keys are stored normalized, the same form lookups see.
    fn insert(&mut self, source: &str, target: &str) -> bool {
        let source = normalize(source, Direction::from_source(self.language));
        if source.is_empty() {
            warn!("Ignoring phrase with an empty key ({})", self.language);
            return false;
        }

        let key = fold(&source, self.language);
        if self.index.contains_key(&key) {
            debug!("Skipping duplicate phrase '{}' ({})", source, self.language);
            return false;
        }

        self.index.insert(key, self.entries.len());
        self.entries.push(PhraseEntry {
            source,
            target: target.trim().to_string(),
        });
        true
    }

    fn rebuild_length_order(&mut self) {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        // sort_by_key is stable, so equal lengths keep insertion order
        order.sort_by_key(|&i| std::cmp::Reverse(self.entries[i].source.chars().count()));
        self.by_length = order;
    }

    /// Exact lookup of an already folded key
    pub fn get(&self, folded_key: &str) -> Option<&PhraseEntry> {
        self.index.get(folded_key).map(|&i| &self.entries[i])
    }

    /// Exact lookup that folds the key first
    pub fn lookup(&self, phrase: &str) -> Option<&PhraseEntry> {
        self.get(&fold(phrase, self.language))
    }

    pub fn entries(&self) -> &[PhraseEntry] {
        &self.entries
    }

    /// Entries ordered by descending character length of the source phrase
    pub fn by_length_desc(&self) -> impl Iterator<Item = &PhraseEntry> {
        self.by_length.iter().map(|&i| &self.entries[i])
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// On-disk format for additional phrases
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PhraseFile {
    #[serde(default)]
    pub en_fa: Vec<(String, String)>,
    #[serde(default)]
    pub fa_en: Vec<(String, String)>,
}

/// Immutable bilingual phrase dictionary, one table per direction
#[derive(Debug, Clone)]
pub struct PhraseDictionary {
    en_fa: PhraseTable,
    fa_en: PhraseTable,
}

impl PhraseDictionary {
    pub fn from_pairs<'a>(
        en_fa: impl IntoIterator<Item = (&'a str, &'a str)>,
        fa_en: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut dictionary = Self {
            en_fa: PhraseTable::new(Language::English),
            fa_en: PhraseTable::new(Language::Persian),
        };
        for (source, target) in en_fa {
            dictionary.en_fa.insert(source, target);
        }
        for (source, target) in fa_en {
            dictionary.fa_en.insert(source, target);
        }
        dictionary.en_fa.rebuild_length_order();
        dictionary.fa_en.rebuild_length_order();
        dictionary
    }

    /// The phrase tables compiled into the binary
    pub fn builtin() -> Self {
        Self::from_pairs(
            ENGLISH_TO_PERSIAN.iter().copied(),
            PERSIAN_TO_ENGLISH.iter().copied(),
        )
    }

    /// Load a dictionary from a TOML phrase file alone
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = Self::read_phrase_file(path)?;
        Ok(Self::from_pairs(
            file.en_fa.iter().map(|(s, t)| (s.as_str(), t.as_str())),
            file.fa_en.iter().map(|(s, t)| (s.as_str(), t.as_str())),
        ))
    }

    /// Append phrases from a TOML file; existing keys are kept
    pub fn extended_with<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = Self::read_phrase_file(path)?;

        let mut added = 0;
        for (source, target) in &file.en_fa {
            if self.en_fa.insert(source, target) {
                added += 1;
            }
        }
        for (source, target) in &file.fa_en {
            if self.fa_en.insert(source, target) {
                added += 1;
            }
        }
        self.en_fa.rebuild_length_order();
        self.fa_en.rebuild_length_order();

        let skipped = file.en_fa.len() + file.fa_en.len() - added;
        if skipped > 0 {
            warn!("{} phrases in {} were duplicates or empty and ignored", skipped, path.display());
        }
        info!("Loaded {} extra phrases from {}", added, path.display());

        Ok(self)
    }

    fn read_phrase_file<P: AsRef<Path>>(path: P) -> Result<PhraseFile> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TarjomanError::Config(format!("Failed to read phrase file {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            TarjomanError::Config(format!("Failed to parse phrase file {}: {}", path.display(), e))
        })
    }

    pub fn table(&self, direction: Direction) -> &PhraseTable {
        match direction {
            Direction::EnglishToPersian => &self.en_fa,
            Direction::PersianToEnglish => &self.fa_en,
        }
    }
}

impl Default for PhraseDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

const ENGLISH_TO_PERSIAN: &[(&str, &str)] = &[
    // Basic phrases
    ("Hello", "سلام"),
    ("Hi", "سلام"),
    ("Hey", "سلام"),
    ("How are you", "چطور هستید"),
    ("How are you doing", "حال شما چطور است"),
    ("I am good", "من خوبم"),
    ("I am fine", "من خوبم"),
    ("I am well", "من خوبم"),
    ("I am hungry", "من گرسنه هستم"),
    ("Thank you", "متشکرم"),
    ("Thanks", "ممنون"),
    ("Goodbye", "خداحافظ"),
    ("Bye", "خداحافظ"),
    ("Yes", "بله"),
    ("No", "نه"),
    ("Please", "لطفا"),
    ("Excuse me", "ببخشید"),
    ("Sorry", "متأسفم"),
    // Weather
    ("Weather", "هوا"),
    ("Cold", "سرد"),
    ("The weather is cold", "هوا سرد است"),
    ("Hot", "گرم"),
    ("The weather is hot", "هوا گرم است"),
    ("Rain", "باران"),
    ("It is raining", "باران می‌بارد"),
    ("Sunny", "آفتابی"),
    ("The weather is sunny", "هوا آفتابی است"),
    ("Cloudy", "ابری"),
    ("The weather is cloudy", "هوا ابری است"),
    ("Today's weather", "هوا امروز"),
    ("The weather today is good", "هوا امروز خوب است"),
    ("The weather today is very good", "هوا امروز خیلی خوب است"),
    // Adjectives
    ("Good", "خوب"),
    ("Very good", "خیلی خوب"),
    ("Bad", "بد"),
    ("Very bad", "خیلی بد"),
    ("Big", "بزرگ"),
    ("Small", "کوچک"),
    ("Beautiful", "زیبا"),
    ("Ugly", "زشت"),
    // Nouns
    ("House", "خانه"),
    ("Car", "ماشین"),
    ("Food", "غذا"),
    ("Water", "آب"),
    ("Bread", "نان"),
    // Verbs
    ("To go", "رفتن"),
    ("To come", "آمدن"),
    ("To eat", "خوردن"),
    ("To drink", "نوشیدن"),
    ("To see", "دیدن"),
    ("To hear", "شنیدن"),
    ("To sleep", "خوابیدن"),
    ("Is", "است"),
    ("Is not", "نیست"),
    // Time
    ("Tomorrow", "فردا"),
    ("Yesterday", "دیروز"),
    ("Morning", "صبح"),
    ("Noon", "ظهر"),
    ("Night", "شب"),
    // Common phrases
    ("What's new", "چه خبر"),
    ("Nothing new", "خبری نیست"),
    ("My name is", "اسم من"),
    ("I am from Iran", "من اهل ایران هستم"),
    ("I don't know Persian", "من فارسی بلد نیستم"),
    ("I don't know English", "من انگلیسی بلد نیستم"),
    ("I like", "دوست دارم"),
    ("I don't like", "دوست ندارم"),
];

const PERSIAN_TO_ENGLISH: &[(&str, &str)] = &[
    // Basic phrases
    ("سلام", "Hello"),
    ("چطوری", "How are you"),
    ("چطور هستید", "How are you"),
    ("حال شما چطور است", "How are you"),
    ("خوبم", "I am good"),
    ("من خوبم", "I am good"),
    ("من گرسنه هستم", "I am hungry"),
    ("گرسنه هستم", "I am hungry"),
    ("تشکر", "Thank you"),
    ("ممنون", "Thank you"),
    ("متشکرم", "Thank you"),
    ("خداحافظ", "Goodbye"),
    ("خدانگهدار", "Goodbye"),
    ("بله", "Yes"),
    ("نه", "No"),
    ("لطفا", "Please"),
    ("ببخشید", "Excuse me"),
    // Weather
    ("هوا", "Weather"),
    ("سرد", "Cold"),
    ("هوا سرد است", "The weather is cold"),
    ("گرم", "Hot"),
    ("هوا گرم است", "The weather is hot"),
    ("باران", "Rain"),
    ("باران می‌بارد", "It is raining"),
    ("آفتابی", "Sunny"),
    ("هوا آفتابی است", "The weather is sunny"),
    ("ابری", "Cloudy"),
    ("هوا ابری است", "The weather is cloudy"),
    ("امروز", "Today"),
    ("هوا امروز", "Today's weather"),
    ("هوا امروز خوب است", "The weather today is good"),
    ("هوا امروز خیلی خوب است", "The weather today is very good"),
    // Adjectives
    ("خوب", "Good"),
    ("خیلی خوب", "Very good"),
    ("بد", "Bad"),
    ("خیلی بد", "Very bad"),
    ("بزرگ", "Big"),
    ("کوچک", "Small"),
    ("زیبا", "Beautiful"),
    ("زشت", "Ugly"),
    // Nouns
    ("خانه", "House"),
    ("ماشین", "Car"),
    ("غذا", "Food"),
    ("آب", "Water"),
    ("نان", "Bread"),
    // Verbs
    ("رفتن", "To go"),
    ("آمدن", "To come"),
    ("خوردن", "To eat"),
    ("نوشیدن", "To drink"),
    ("دیدن", "To see"),
    ("شنیدن", "To hear"),
    ("خوابیدن", "To sleep"),
    ("است", "Is"),
    ("هست", "Is"),
    ("نیست", "Is not"),
    // Time
    ("فردا", "Tomorrow"),
    ("دیروز", "Yesterday"),
    ("صبح", "Morning"),
    ("ظهر", "Noon"),
    ("شب", "Night"),
    // Common phrases
    ("چه خبر", "What's new"),
    ("خبری نیست", "Nothing new"),
    ("نام من", "My name is"),
    ("اسم من", "My name is"),
    ("من اهل ایران هستم", "I am from Iran"),
    ("من فارسی بلد نیستم", "I don't know Persian"),
    ("من انگلیسی بلد نیستم", "I don't know English"),
    ("دوست دارم", "I like"),
    ("دوست ندارم", "I don't like"),
];
