use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;
use crate::vm::{DemoOption, DemoQuiz, Language, OptionMark};

#[component]
pub fn DemoView() -> Element {
    let mut quiz = use_signal(DemoQuiz::new);
    let snapshot = quiz.read().clone();
    let lang = snapshot.language();
    let (ar_class, en_class) = match lang {
        Language::Ar => ("active", ""),
        Language::En => ("", "active"),
    };

    rsx! {
        div { class: "page demo",
            div { class: "demo-header",
                div { class: "demo-lang-toggle",
                    span { class: ar_class, onclick: move |_| quiz.write().toggle_language(), "AR" }
                    span { class: en_class, onclick: move |_| quiz.write().toggle_language(), "EN" }
                }
            }
            div { class: "demo-content", dir: lang.dir(), lang: lang.code(),
                if snapshot.is_complete() {
                    DemoComplete { quiz: snapshot.clone(), on_restart: move |_| quiz.write().restart() }
                } else {
                    DemoQuestionPanel {
                        quiz: snapshot.clone(),
                        on_answer: move |letter: char| quiz.write().answer(letter),
                        on_next: move |_| quiz.write().next(),
                    }
                }
            }
        }
    }
}

#[component]
fn DemoQuestionPanel(
    quiz: DemoQuiz,
    on_answer: EventHandler<char>,
    on_next: EventHandler<()>,
) -> Element {
    let lang = quiz.language();
    let question = quiz.question();
    let heading = match lang {
        Language::En => format!("Question {}", quiz.number()),
        Language::Ar => format!("السؤال {}", quiz.number()),
    };
    let last = quiz.number() == quiz.total();
    let next_label = match (lang, last) {
        (Language::En, false) => "Next Question →",
        (Language::En, true) => "See Results",
        (Language::Ar, false) => "السؤال التالي ←",
        (Language::Ar, true) => "عرض النتائج",
    };
    let feedback = quiz.answered_correctly().map(|correct| {
        let class = if correct {
            "demo-feedback correct"
        } else {
            "demo-feedback incorrect"
        };
        let badge = match (correct, lang) {
            (true, Language::En) => "Correct!",
            (true, Language::Ar) => "صحيح!",
            (false, Language::En) => "Incorrect",
            (false, Language::Ar) => "خطأ",
        };
        (class, badge)
    });

    rsx! {
        div { class: "demo-progress", "{quiz.progress_label()}" }
        div { class: "demo-question",
            h4 { "{heading}" }
            p { "{question.prompt.get(lang)}" }
        }
        div { class: "demo-answers",
            for option in question.options {
                AnswerOption {
                    key: "{option.letter}",
                    option,
                    lang,
                    mark: quiz.mark(option.letter),
                    selected: quiz.selected() == Some(option.letter),
                    on_answer,
                }
            }
        }
        if let Some((class, badge)) = feedback {
            div { class,
                div { class: "feedback-badge", "{badge}" }
                p { "{question.explanation.get(lang)}" }
            }
            button { class: "btn-next", onclick: move |_| on_next.call(()), "{next_label}" }
        }
    }
}

#[component]
fn AnswerOption(
    option: DemoOption,
    lang: Language,
    mark: OptionMark,
    selected: bool,
    on_answer: EventHandler<char>,
) -> Element {
    let class = match mark {
        OptionMark::Correct => "demo-answer correct",
        OptionMark::Incorrect => "demo-answer incorrect",
        OptionMark::Plain if selected => "demo-answer selected",
        OptionMark::Plain => "demo-answer",
    };
    let letter = option.letter;

    rsx! {
        div { class, onclick: move |_| on_answer.call(letter),
            span { class: "answer-letter", "{letter}" }
            span { class: "answer-text", "{option.text.get(lang)}" }
            match mark {
                OptionMark::Correct => rsx! {
                    span { class: "answer-check", "✓" }
                },
                OptionMark::Incorrect => rsx! {
                    span { class: "answer-cross", "✗" }
                },
                OptionMark::Plain => rsx! {},
            }
        }
    }
}

#[component]
fn DemoComplete(quiz: DemoQuiz, on_restart: EventHandler<()>) -> Element {
    let (title, message, signup, retry) = match quiz.language() {
        Language::En => (
            "Demo Complete!",
            "See how instant feedback helps you learn? This is just a taste of what Dr Fahm offers across 10 worlds with hundreds of questions.",
            "View plans →",
            "Try demo again",
        ),
        Language::Ar => (
            "اكتمل العرض التوضيحي!",
            "هل ترى كيف تساعدك التغذية الراجعة الفورية على التعلم؟ هذه مجرد لمحة عما يقدمه Dr Fahm عبر 10 عوالم تحتوي على مئات الأسئلة.",
            "عرض الخطط ←",
            "إعادة المحاولة",
        ),
    };

    rsx! {
        div { class: "demo-complete",
            div { class: "complete-icon", "✓" }
            h3 { "{title}" }
            p { class: "score-display", "{quiz.score_label()}" }
            p { class: "complete-message", "{message}" }
            Link { class: "btn-continue", to: Route::Pricing {}, "{signup}" }
            button { class: "btn-restart", onclick: move |_| on_restart.call(()), "{retry}" }
        }
    }
}
