//! Phase catalog - localized names, image assets, and ritual lists per
//! display bucket, plus the mapping from the provider's eight-valued
//! vocabulary onto the four buckets.

use crate::core::types::{Language, MoonPhase, SubPhase};

impl SubPhase {
    /// Fold the eight sub-phases into the four display buckets. All waxing
    /// sub-phases merge into WaxingMoon, all waning into WaningMoon.
    pub fn bucket(&self) -> MoonPhase {
        match self {
            SubPhase::New => MoonPhase::NewMoon,
            SubPhase::WaxingCrescent | SubPhase::FirstQuarter | SubPhase::WaxingGibbous => {
                MoonPhase::WaxingMoon
            }
            SubPhase::Full => MoonPhase::FullMoon,
            SubPhase::WaningGibbous | SubPhase::LastQuarter | SubPhase::WaningCrescent => {
                MoonPhase::WaningMoon
            }
        }
    }
}

impl MoonPhase {
    /// Localized display name of the phase.
    pub fn name(&self, language: Language) -> &'static str {
        match (self, language) {
            (MoonPhase::NewMoon, Language::Ru) => "Новолуние",
            (MoonPhase::NewMoon, Language::Lt) => "Jaunatis",
            (MoonPhase::WaxingMoon, Language::Ru) => "Растущая луна",
            (MoonPhase::WaxingMoon, Language::Lt) => "Priešpilnis",
            (MoonPhase::FullMoon, Language::Ru) => "Полнолуние",
            (MoonPhase::FullMoon, Language::Lt) => "Pilnatis",
            (MoonPhase::WaningMoon, Language::Ru) => "Убывающая луна",
            (MoonPhase::WaningMoon, Language::Lt) => "Delčia",
        }
    }

    /// Relative asset path of the phase illustration.
    pub fn image_path(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "assets/moon/new-moon.png",
            MoonPhase::WaxingMoon => "assets/moon/waxing-moon.png",
            MoonPhase::FullMoon => "assets/moon/full-moon.png",
            MoonPhase::WaningMoon => "assets/moon/waning-moon.png",
        }
    }

    /// Recommended rituals for the phase, in display order.
    pub fn rituals(&self, language: Language) -> &'static [&'static str] {
        match (self, language) {
            (MoonPhase::NewMoon, Language::Ru) => &[
                "Загадайте желание и запишите его на бумаге",
                "Составьте список целей на лунный месяц",
                "Зажгите белую свечу для нового начинания",
            ],
            (MoonPhase::NewMoon, Language::Lt) => &[
                "Sumanykite norą ir užrašykite jį ant popieriaus",
                "Sudarykite mėnesio tikslų sąrašą",
                "Uždekite baltą žvakę naujai pradžiai",
            ],
            (MoonPhase::WaxingMoon, Language::Ru) => &[
                "Начинайте новые проекты и знакомства",
                "Проводите ритуалы на привлечение достатка",
                "Заряжайте талисманы на рост и удачу",
            ],
            (MoonPhase::WaxingMoon, Language::Lt) => &[
                "Pradėkite naujus projektus ir pažintis",
                "Atlikite gausos pritraukimo ritualus",
                "Įkraukite talismanus augimui ir sėkmei",
            ],
            (MoonPhase::FullMoon, Language::Ru) => &[
                "Проводите гадания — энергия луны на пике",
                "Заряжайте воду и кристаллы лунным светом",
                "Благодарите за достигнутое в этом цикле",
            ],
            (MoonPhase::FullMoon, Language::Lt) => &[
                "Atlikite būrimus — mėnulio energija pačiame pike",
                "Įkraukite vandenį ir kristalus mėnulio šviesa",
                "Padėkokite už tai, kas pasiekta šiame cikle",
            ],
            (MoonPhase::WaningMoon, Language::Ru) => &[
                "Избавляйтесь от вредных привычек",
                "Проводите очищение дома и мыслей",
                "Завершайте начатые дела",
            ],
            (MoonPhase::WaningMoon, Language::Lt) => &[
                "Atsikratykite žalingų įpročių",
                "Išvalykite namus ir mintis",
                "Užbaikite pradėtus darbus",
            ],
        }
    }
}
