//! Line selectors for multi-buffer indicators (the `mode` argument).

use mt4client_core::mql_enum;

mql_enum! {
    pub enum AdxLine {
        Main = 0 => "MODE_MAIN",
        PlusDi = 1 => "MODE_PLUSDI",
        MinusDi = 2 => "MODE_MINUSDI",
    }
}

mql_enum! {
    pub enum BandsLine {
        Main = 0 => "MODE_MAIN",
        Upper = 1 => "MODE_UPPER",
        Lower = 2 => "MODE_LOWER",
    }
}

mql_enum! {
    pub enum IchimokuLine {
        TenkanSen = 1 => "MODE_TENKANSEN",
        KijunSen = 2 => "MODE_KIJUNSEN",
        SenkouSpanA = 3 => "MODE_SENKOUSPANA",
        SenkouSpanB = 4 => "MODE_SENKOUSPANB",
        ChikouSpan = 5 => "MODE_CHIKOUSPAN",
    }
}

mql_enum! {
    /// Main/signal selector shared by MACD, Stochastic and RVI.
    pub enum MacdLine {
        Main = 0 => "MODE_MAIN",
        Signal = 1 => "MODE_SIGNAL",
    }
}

pub type StochasticLine = MacdLine;
pub type RviLine = MacdLine;

mql_enum! {
    pub enum AlligatorLine {
        GatorJaw = 1 => "MODE_GATORJAW",
        GatorTeeth = 2 => "MODE_GATORTEETH",
        GatorLips = 3 => "MODE_GATORLIPS",
    }
}

mql_enum! {
    /// Upper/lower selector for Envelopes, Fractals and Gator.
    pub enum UpperLowerLine {
        Upper = 1 => "MODE_UPPER",
        Lower = 2 => "MODE_LOWER",
    }
}
