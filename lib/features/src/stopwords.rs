//! Stopword lists for overview filtering.
//!
//! English and French lists are compiled in. When a stopword directory is
//! configured, each language is read from `<dir>/<language name>` instead,
//! one word per line. A language that cannot be resolved contributes no
//! words and is reported as a [`DegradedResource`].

use crate::report::DegradedResource;
use ahash::AHashSet;
use std::collections::BTreeSet;
use std::path::Path;

const ENGLISH: &str = "i me my myself we our ours ourselves you you're you've you'll you'd your \
yours yourself yourselves he him his himself she she's her hers herself it it's its itself they \
them their theirs themselves what which who whom this that that'll these those am is are was were \
be been being have has had having do does did doing a an the and but if or because as until while \
of at by for with about against between into through during before after above below to from up \
down in out on off over under again further then once here there when where why how all any both \
each few more most other some such no nor not only own same so than too very s t can will just don \
don't should should've now d ll m o re ve y ain aren aren't couldn couldn't didn didn't doesn \
doesn't hadn hadn't hasn hasn't haven haven't isn isn't ma mightn mightn't mustn mustn't needn \
needn't shan shan't shouldn shouldn't wasn wasn't weren weren't won won't wouldn wouldn't";

const FRENCH: &str = "au aux avec ce ces dans de des du elle en et eux il ils je la le les leur \
lui ma mais me même mes moi mon ne nos notre nous on ou par pas pour qu que qui sa se ses son sur \
ta te tes toi ton tu un une vos votre vous c d j l à m n s t y été étée étées étés étant étante \
étants étantes suis es est sommes êtes sont serai seras sera serons serez seront serais serait \
serions seriez seraient étais était étions étiez étaient fus fut fûmes fûtes furent sois soit \
soyons soyez soient fusse fusses fût fussions fussiez fussent ayant ayante ayantes ayants eu eue \
eues eus ai as avons avez ont aurai auras aura aurons aurez auront aurais aurait aurions auriez \
auraient avais avait avions aviez avaient eut eûmes eûtes eurent aie aies ait ayons ayez aient \
eusse eusses eût eussions eussiez eussent";

/// Map a language code (`en`, `fr`) or name to its canonical name.
#[must_use]
pub fn language_name(code: &str) -> Option<&'static str> {
    match code.trim().to_lowercase().as_str() {
        "en" | "eng" | "english" => Some("english"),
        "fr" | "fra" | "fre" | "french" => Some("french"),
        _ => None,
    }
}

fn builtin(name: &str) -> Option<&'static str> {
    match name {
        "english" => Some(ENGLISH),
        "french" => Some(FRENCH),
        _ => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    words: AHashSet<String>,
}

impl Stopwords {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Union of the lists for `languages`, plus one entry per language that
    /// could not be loaded.
    pub fn resolve(
        languages: &BTreeSet<String>,
        dir: Option<&Path>,
    ) -> (Self, Vec<DegradedResource>) {
        let mut words = AHashSet::new();
        let mut degraded = Vec::new();

        for code in languages {
            let resource = format!("stopwords[{}]", code);
            let Some(name) = language_name(code) else {
                degraded.push(DegradedResource::new(resource, "unknown language code"));
                continue;
            };

            let loaded = match dir {
                Some(dir) => {
                    let path = dir.join(name);
                    std::fs::read_to_string(&path)
                        .map(|content| Self::from_words(content.lines()))
                        .map_err(|e| format!("{}: {}", path.display(), e))
                }
                None => builtin(name)
                    .map(|list| Self::from_words(list.split_whitespace()))
                    .ok_or_else(|| "no built-in list".to_string()),
            };

            match loaded {
                Ok(list) => {
                    tracing::debug!(language = name, words = list.len(), "stopwords loaded");
                    words.extend(list.words);
                }
                Err(reason) => degraded.push(DegradedResource::new(resource, reason)),
            }
        }

        for d in &degraded {
            d.warn();
        }
        (Self { words }, degraded)
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
