//! Built-in uncontracted tables for each [`Language`].

use crate::CoreError;

use super::dictionary::LanguageDictionary;
use super::{Grade, Language};

const NUMERIC_SIGN: char = '⠼';

const LATIN_LETTERS: &[(&str, char)] = &[
    ("a", '⠁'), ("b", '⠃'), ("c", '⠉'), ("d", '⠙'), ("e", '⠑'), ("f", '⠋'),
    ("g", '⠛'), ("h", '⠓'), ("i", '⠊'), ("j", '⠚'), ("k", '⠅'), ("l", '⠇'),
    ("m", '⠍'), ("n", '⠝'), ("o", '⠕'), ("p", '⠏'), ("q", '⠟'), ("r", '⠗'),
    ("s", '⠎'), ("t", '⠞'), ("u", '⠥'), ("v", '⠧'), ("w", '⠺'), ("x", '⠭'),
    ("y", '⠽'), ("z", '⠵'),
];

/// Digits reuse the a-j cells behind a numeric sign.
const DIGITS: &[(char, char)] = &[
    ('1', '⠁'), ('2', '⠃'), ('3', '⠉'), ('4', '⠙'), ('5', '⠑'),
    ('6', '⠋'), ('7', '⠛'), ('8', '⠓'), ('9', '⠊'), ('0', '⠚'),
];

const ENGLISH_PUNCTUATION: &[(char, char)] = &[
    (' ', '⠀'), (',', '⠂'), (';', '⠆'), (':', '⠒'), ('.', '⠲'), ('!', '⠖'),
    ('?', '⠦'), ('-', '⠤'), ('\'', '⠄'), ('(', '⠷'), (')', '⠾'), ('"', '⠶'),
];

/// Initial-letter contractions and final-letter groupsigns.
const ENGLISH_CONTRACTIONS: &[(&str, &str)] = &[
    // dot 5
    ("⠐⠙", "day"), ("⠐⠑", "ever"), ("⠐⠋", "father"), ("⠐⠓", "here"),
    ("⠐⠅", "know"), ("⠐⠇", "lord"), ("⠐⠍", "mother"), ("⠐⠝", "name"),
    ("⠐⠕", "one"), ("⠐⠏", "part"), ("⠐⠟", "question"), ("⠐⠗", "right"),
    ("⠐⠎", "some"), ("⠐⠞", "time"), ("⠐⠥", "under"), ("⠐⠺", "work"),
    ("⠐⠽", "young"), ("⠐⠮", "there"), ("⠐⠡", "character"), ("⠐⠹", "through"),
    ("⠐⠱", "where"), ("⠐⠳", "ought"),
    // dots 45
    ("⠘⠥", "upon"), ("⠘⠺", "word"), ("⠘⠮", "these"), ("⠘⠹", "those"),
    ("⠘⠱", "whose"),
    // dots 456
    ("⠸⠉", "cannot"), ("⠸⠓", "had"), ("⠸⠍", "many"), ("⠸⠎", "spirit"),
    ("⠸⠺", "world"), ("⠸⠮", "their"),
    // dots 46
    ("⠨⠑", "ence"), ("⠨⠛", "ong"), ("⠨⠇", "ful"), ("⠨⠝", "tion"),
    ("⠨⠎", "ness"), ("⠨⠞", "ment"), ("⠨⠽", "ity"),
    // dots 56
    ("⠰⠙", "ound"), ("⠰⠑", "ance"), ("⠰⠝", "sion"), ("⠰⠎", "less"),
    ("⠰⠞", "ount"),
];

const FRENCH_ACCENTED: &[(&str, char)] = &[
    ("é", '⠿'), ("à", '⠷'), ("è", '⠮'), ("ù", '⠾'), ("â", '⠡'), ("ê", '⠣'),
    ("î", '⠩'), ("ô", '⠹'), ("û", '⠱'), ("ë", '⠫'), ("ï", '⠻'), ("ü", '⠳'),
    ("ç", '⠯'), ("œ", '⠪'),
];

const FRENCH_PUNCTUATION: &[(char, char)] = &[
    (' ', '⠀'), (',', '⠂'), (';', '⠆'), (':', '⠒'), ('.', '⠲'), ('?', '⠢'),
    ('!', '⠖'), ('"', '⠶'), ('(', '⠦'), (')', '⠴'), ('-', '⠤'), ('\'', '⠄'),
];

const ARABIC_LETTERS: &[(&str, char)] = &[
    ("ا", '⠁'), ("ب", '⠃'), ("ت", '⠞'), ("ث", '⠹'), ("ج", '⠚'), ("ح", '⠱'),
    ("خ", '⠭'), ("د", '⠙'), ("ذ", '⠮'), ("ر", '⠗'), ("ز", '⠵'), ("س", '⠎'),
    ("ش", '⠩'), ("ص", '⠯'), ("ض", '⠫'), ("ط", '⠾'), ("ظ", '⠿'), ("ع", '⠷'),
    ("غ", '⠣'), ("ف", '⠋'), ("ق", '⠟'), ("ك", '⠅'), ("ل", '⠇'), ("م", '⠍'),
    ("ن", '⠝'), ("ه", '⠓'), ("و", '⠺'), ("ي", '⠊'), ("ة", '⠡'), ("ى", '⠕'),
    ("ء", '⠄'), ("أ", '⠌'), ("إ", '⠨'), ("آ", '⠜'), ("ؤ", '⠳'), ("ئ", '⠽'),
    ("لا", '⠧'),
];

const ARABIC_PUNCTUATION: &[(char, char)] = &[
    (' ', '⠀'), ('،', '⠐'), ('؛', '⠰'), ('؟', '⠦'), ('.', '⠲'), ('!', '⠖'),
    (':', '⠒'), ('-', '⠤'),
];

const RUSSIAN_LETTERS: &[(&str, char)] = &[
    ("а", '⠁'), ("б", '⠃'), ("в", '⠺'), ("г", '⠛'), ("д", '⠙'), ("е", '⠑'),
    ("ё", '⠡'), ("ж", '⠚'), ("з", '⠵'), ("и", '⠊'), ("й", '⠯'), ("к", '⠅'),
    ("л", '⠇'), ("м", '⠍'), ("н", '⠝'), ("о", '⠕'), ("п", '⠏'), ("р", '⠗'),
    ("с", '⠎'), ("т", '⠞'), ("у", '⠥'), ("ф", '⠋'), ("х", '⠓'), ("ц", '⠉'),
    ("ч", '⠟'), ("ш", '⠱'), ("щ", '⠭'), ("ъ", '⠷'), ("ы", '⠮'), ("ь", '⠾'),
    ("э", '⠪'), ("ю", '⠳'), ("я", '⠫'),
];

const RUSSIAN_PUNCTUATION: &[(char, char)] = &[
    (' ', '⠀'), (',', '⠂'), ('.', '⠲'), (';', '⠆'), (':', '⠒'), ('!', '⠖'),
    ('?', '⠢'), ('-', '⠤'), ('"', '⠶'), ('(', '⠣'), (')', '⠜'),
];

pub(crate) fn dictionary(language: Language, grade: Grade) -> Result<LanguageDictionary, CoreError> {
    let builder = LanguageDictionary::builder(language, grade).digits(DIGITS);

    let builder = match language {
        Language::English => {
            let builder = builder
                .capital('⠠')
                .numeric(NUMERIC_SIGN)
                .letters(LATIN_LETTERS)
                .punctuation(ENGLISH_PUNCTUATION);
            match grade {
                Grade::One => builder,
                Grade::Two => builder.contractions(ENGLISH_CONTRACTIONS),
            }
        }
        Language::French => builder
            .capital('⠨')
            .numeric('⠠')
            .letters(LATIN_LETTERS)
            .letters(FRENCH_ACCENTED)
            .punctuation(FRENCH_PUNCTUATION),
        Language::Arabic => builder
            .numeric(NUMERIC_SIGN)
            .letters(ARABIC_LETTERS)
            .punctuation(ARABIC_PUNCTUATION),
        Language::Russian => builder
            .capital('⠘')
            .numeric(NUMERIC_SIGN)
            .ignore('⠿')
            .letters(RUSSIAN_LETTERS)
            .punctuation(RUSSIAN_PUNCTUATION),
    };

    builder.build()
}
