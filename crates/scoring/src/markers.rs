//! Keyword markers matched against segment text
//!
//! Phrases are Azerbaijani first, with the Russian and English variants
//! that show up in mixed-language calls.

use call_qc_text_processing::{contains_cvv, has_silence_marker};
use once_cell::sync::Lazy;
use regex::Regex;

static INTERNAL_LEAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)(rəhbərlik|şirkət|investisiya|böhran|serverlər|server|texniklərimiz|menecer).*",
        r"(heç nə etmir|investisiya etmir|köhnədir|az qalıb|böhran|qayğısına qalmaz|heç nə gəlmir|pis)",
        r"|bizim əlimizdən heç nə gəlmir",
        r"|sistemimiz\s+çox\s+pis",
        r"|başqa operatora keç",
    ))
    .unwrap()
});

static CALLBACK_REFUSAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)geri zəng etmirik|geri zəng etmərik|geri zəng yoxdur|sonra zəng et|yenidən zəng et|özünüz sabah bir daha zəng",
        r"|\b(?:no|not|never|cannot|can't|won't|don't|doesn't)\W+(?:\w+\W+){0,2}call\s*-?back",
        r"|özün.*zəng\s*et",
        r"|belə\s*xidmət\s*(?:yoxdur|olmur)",
        r"|не\s+перезв[ао]н",
    ))
    .unwrap()
});

static EMPATHY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)başa düş|narahat|üzr|təəssüf|sorry|понимаю").unwrap());

static CHECKING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)məlumatı?\s*yoxlay|yoxlayıram|məbləğ\s+nə\s+qədərdir|mebleg\s+ne\s+qederdir").unwrap()
});

static NEXT_STEPS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)ticket|qeyd|qeydə al|müraciət|texnik|24 saat|18:00|gələcək|SMS|link göndər|transfer|departament")
        .unwrap()
});

static PII_PROTECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:kart məlumat|kart nömrə).*?(?:deməyin|deyilməsin|heç vaxt)|təhlükəsiz|secure|link göndər|sms alacaqsınız",
    )
    .unwrap()
});

static OWNERSHIP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)ticket|prioritet|texnik|alternativ|həll edək|indi edək|göndəririk").unwrap()
});

static RESOLUTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)restart|ayırın|qoşun|paket|manat|texnik|alternativ|tətbiq|yükləyin").unwrap()
});

static ETIQUETTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)kontakt|salam|xahiş|rica|yaxşı gün|добрый|здравствуйте").unwrap()
});

static CLARIFYING_QUESTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)məbləğ|nə qədər|hansı kart|müqavilə|telefon|ünvan").unwrap());

static UNDERSTANDING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)başa düş|narahat|üzr|təəssüf|sorry|понимаю|\?|sistem|problem").unwrap()
});

static PAYMENT_COMPLETED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:ödəniş|payment).*(?:edildi|etdi|oldu|tamamlandı|completed)|ödəniş\s+uğurla").unwrap()
});

static PROCESS_CONFIRMATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)ödəniş|qeydə alındı|sms|link").unwrap());

static TICKET_OR_NOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)ticket|qeyd").unwrap());

static PARTIAL_REGISTRATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)ticket açım|ticket açaram|qeyd edim|qeyd edərəm|ödəniş edildi|ödəniş uğurla").unwrap()
});

static CARD_MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)kart").unwrap());

static SENSITIVE_TOPIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)cvv|cvc|kart|fin").unwrap());

/// A named phrase family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Operator disclosing internal or company problems
    InternalLeak,
    /// Refusal to call the customer back
    CallbackRefusal,
    Empathy,
    /// Operator says they are looking something up
    Checking,
    /// Ticket, registration, visit or transfer
    NextSteps,
    /// Steering the customer away from saying card data aloud
    PiiProtection,
    /// Explicit ownership of the problem
    Ownership,
    /// Concrete troubleshooting step or product information
    Resolution,
    /// Greeting or closing phrase
    Etiquette,
    /// Non-sensitive clarifying question
    ClarifyingQuestion,
    /// Empathy, a question, or an explanation of the problem
    Understanding,
    PaymentCompleted,
    /// Payment, SMS or link confirmations
    ProcessConfirmation,
    TicketOrNote,
    /// Registration promised or partially confirmed
    PartialRegistration,
    CvvMention,
    CardMention,
    /// CVV, card or FIN mentioned at all
    SensitiveTopic,
    /// Bracketed silence annotation
    Silence,
}

impl Marker {
    /// Whether the text contains the marker
    pub fn matches(self, text: &str) -> bool {
        match self {
            Marker::CvvMention => contains_cvv(text),
            Marker::Silence => has_silence_marker(text) || text.to_lowercase().contains("süküt"),
            other => other.pattern().map(|re| re.is_match(text)).unwrap_or(false),
        }
    }

    fn pattern(self) -> Option<&'static Regex> {
        let re: &'static Regex = match self {
            Marker::InternalLeak => &INTERNAL_LEAK,
            Marker::CallbackRefusal => &CALLBACK_REFUSAL,
            Marker::Empathy => &EMPATHY,
            Marker::Checking => &CHECKING,
            Marker::NextSteps => &NEXT_STEPS,
            Marker::PiiProtection => &PII_PROTECTION,
            Marker::Ownership => &OWNERSHIP,
            Marker::Resolution => &RESOLUTION,
            Marker::Etiquette => &ETIQUETTE,
            Marker::ClarifyingQuestion => &CLARIFYING_QUESTION,
            Marker::Understanding => &UNDERSTANDING,
            Marker::PaymentCompleted => &PAYMENT_COMPLETED,
            Marker::ProcessConfirmation => &PROCESS_CONFIRMATION,
            Marker::TicketOrNote => &TICKET_OR_NOTE,
            Marker::PartialRegistration => &PARTIAL_REGISTRATION,
            Marker::CardMention => &CARD_MENTION,
            Marker::SensitiveTopic => &SENSITIVE_TOPIC,
            Marker::CvvMention | Marker::Silence => return None,
        };
        Some(re)
    }
}
