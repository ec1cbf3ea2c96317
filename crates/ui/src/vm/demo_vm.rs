//! Scripted three-question demo shown to visitors before sign-up.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Ar,
            Self::Ar => Self::En,
        }
    }

    #[must_use]
    pub fn dir(self) -> &'static str {
        match self {
            Self::En => "ltr",
            Self::Ar => "rtl",
        }
    }

    /// BCP 47 tag for the `lang` attribute.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Localized {
    pub en: &'static str,
    pub ar: &'static str,
}

impl Localized {
    #[must_use]
    pub fn get(self, lang: Language) -> &'static str {
        match lang {
            Language::En => self.en,
            Language::Ar => self.ar,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DemoOption {
    pub letter: char,
    pub text: Localized,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DemoQuestion {
    pub prompt: Localized,
    pub options: [DemoOption; 4],
    pub correct: char,
    pub explanation: Localized,
}

const fn opt(letter: char, en: &'static str, ar: &'static str) -> DemoOption {
    DemoOption {
        letter,
        text: Localized { en, ar },
    }
}

pub static DEMO_QUESTIONS: [DemoQuestion; 3] = [
    DemoQuestion {
        prompt: Localized {
            en: "If x + 5 = 12, what is the value of 2x?",
            ar: "إذا كان x + 5 = 12، فما قيمة 2x؟",
        },
        options: [
            opt('A', "14", "١٤"),
            opt('B', "10", "١٠"),
            opt('C', "7", "٧"),
            opt('D', "12", "١٢"),
        ],
        correct: 'A',
        explanation: Localized {
            en: "First solve for x: x + 5 = 12, so x = 7. Then multiply by 2: 2x = 14.",
            ar: "أولاً نحل المعادلة لإيجاد x: إذا كان x + 5 = 12، فإن x = 7. ثم نضرب في 2: إذن 2x = 14.",
        },
    },
    DemoQuestion {
        prompt: Localized {
            en: "What is 15% of 200?",
            ar: "ما هي نسبة 15% من 200؟",
        },
        options: [
            opt('A', "25", "٢٥"),
            opt('B', "30", "٣٠"),
            opt('C', "35", "٣٥"),
            opt('D', "40", "٤٠"),
        ],
        correct: 'B',
        explanation: Localized {
            en: "15% of 200 = (15/100) × 200 = 0.15 × 200 = 30.",
            ar: "نسبة 15% من 200 = (15/100) × 200 = 0.15 × 200 = 30.",
        },
    },
    DemoQuestion {
        prompt: Localized {
            en: "If a triangle has sides of length 3, 4, and 5, what type of triangle is it?",
            ar: "إذا كان للمثلث أضلاع بأطوال 3 و 4 و 5، فما نوع هذا المثلث؟",
        },
        options: [
            opt('A', "Equilateral", "متساوي الأضلاع"),
            opt('B', "Isosceles", "متساوي الساقين"),
            opt('C', "Right-angled", "قائم الزاوية"),
            opt('D', "Obtuse", "منفرج الزاوية"),
        ],
        correct: 'C',
        explanation: Localized {
            en: "3² + 4² = 9 + 16 = 25 = 5². This satisfies the Pythagorean theorem, so it's a right-angled triangle.",
            ar: "بما أن 3² + 4² = 9 + 16 = 25 = 5²، فهذا يحقق نظرية فيثاغورس، لذلك هو مثلث قائم الزاوية.",
        },
    },
];

/// How an option should be drawn after an answer is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Plain,
    Correct,
    Incorrect,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DemoQuiz {
    current: usize,
    selected: Option<char>,
    score: u32,
    complete: bool,
    language: Language,
}

impl DemoQuiz {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn question(&self) -> &'static DemoQuestion {
        &DEMO_QUESTIONS[self.current.min(DEMO_QUESTIONS.len() - 1)]
    }

    #[must_use]
    pub fn number(&self) -> usize {
        self.current + 1
    }

    #[must_use]
    pub fn total(&self) -> usize {
        DEMO_QUESTIONS.len()
    }

    #[must_use]
    pub fn selected(&self) -> Option<char> {
        self.selected
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggled();
    }

    /// Only the first choice per question counts.
    pub fn answer(&mut self, letter: char) {
        if self.complete || self.selected.is_some() {
            return;
        }
        self.selected = Some(letter);
        if letter == self.question().correct {
            self.score += 1;
        }
    }

    #[must_use]
    pub fn answered_correctly(&self) -> Option<bool> {
        self.selected.map(|letter| letter == self.question().correct)
    }

    #[must_use]
    pub fn mark(&self, letter: char) -> OptionMark {
        let Some(selected) = self.selected else {
            return OptionMark::Plain;
        };
        let correct = self.question().correct;
        if letter == correct {
            OptionMark::Correct
        } else if letter == selected {
            OptionMark::Incorrect
        } else {
            OptionMark::Plain
        }
    }

    /// Advance after feedback; finishing the last question completes the demo.
    pub fn next(&mut self) {
        if self.selected.is_none() || self.complete {
            return;
        }
        if self.current + 1 < DEMO_QUESTIONS.len() {
            self.current += 1;
            self.selected = None;
        } else {
            self.complete = true;
        }
    }

    /// Start over, keeping the chosen language.
    pub fn restart(&mut self) {
        *self = Self {
            language: self.language,
            ..Self::default()
        };
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        match self.language {
            Language::En => format!("Question {} of {}", self.number(), self.total()),
            Language::Ar => format!("السؤال {} من {}", self.number(), self.total()),
        }
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        match self.language {
            Language::En => format!("You got {} out of {} correct", self.score, self.total()),
            Language::Ar => format!("لقد أجبت بشكل صحيح على {} من {}", self.score, self.total()),
        }
    }
}
