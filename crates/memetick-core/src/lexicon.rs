use std::collections::HashSet;

/// Words and slang that must never be treated as tickers, even when they
/// match the ticker shape. Grouped roughly by why they show up in scans:
/// common English words, web/trading vocabulary, forum slang, and two-letter
/// words that are never worth reporting.
const REJECTED_WORDS: &[&str] = &[
    "THE", "AND", "FOR", "ARE", "BUT", "NOT", "YOU", "ALL", "CAN", "HER",
    "WAS", "ONE", "OUR", "OUT", "DAY", "GET", "HAS", "HIM", "HIS", "HOW",
    "ITS", "MAY", "NEW", "NOW", "OLD", "SEE", "TWO", "WHO", "BOY", "DID",
    "USA", "WHY", "WAY", "TOP", "TOO", "SHE", "SAY", "RUN", "OWN", "OFF",
    "MAN", "LET", "GOT", "FEW", "FAR", "EYE", "END", "EAR", "AGO", "STOCK",
    "PRICE", "NEWS", "DATA", "INFO", "PAGE", "SITE", "HOME", "MENU", "CALL", "PUTS",
    "HOLD", "SELL", "MOON", "BUY", "GAIN", "LOSS", "PUMP", "DUMP", "BULL", "BEAR",
    "CASH", "LOAD", "OPEN", "CLOSE", "HIGH", "BACK", "MAKE", "TAKE", "COME", "KNOW",
    "THINK", "LOOK", "FIRST", "LAST", "LONG", "GREAT", "LITTLE", "RIGHT", "STILL", "SMALL",
    "LARGE", "NEXT", "EARLY", "YOUNG", "IMPORTANT", "DIFFERENT", "FOLLOWING", "WITHOUT", "AGAINST", "NOTHING",
    "WITH", "FROM", "THEY", "BEEN", "HAVE", "THEIR", "SAID", "EACH", "WHICH", "WHAT",
    "WILL", "THERE", "WOULD", "COULD", "OTHER", "AFTER", "WELL", "ALSO", "WHERE", "MUCH",
    "THROUGH", "WHEN", "TIME", "VERY", "YEARS", "WORK", "LIFE", "ONLY", "OVER", "USE",
    "EVEN", "WANT", "BECAUSE", "ANY", "THESE", "GIVE", "MOST", "US", "IS", "WATER",
    "THAN", "OIL", "FIND", "DOWN", "PUT", "TRY", "KIND", "HAND", "PICTURE", "AGAIN",
    "CHANGE", "PLAY", "SPELL", "AIR", "AWAY", "ANIMAL", "HOUSE", "POINT", "LETTER", "MOTHER",
    "ANSWER", "FOUND", "STUDY", "LEARN", "SHOULD", "AMERICA", "WORLD", "EVERY", "NEAR", "ADD",
    "FOOD", "BETWEEN", "BELOW", "COUNTRY", "PLANT", "SCHOOL", "FATHER", "KEEP", "TREE", "NEVER",
    "START", "CITY", "EARTH", "LIGHT", "THOUGHT", "HEAD", "UNDER", "STORY", "SAW", "LEFT",
    "DONT", "WHILE", "ALONG", "MIGHT", "SOMETHING", "SEEM", "HARD", "EXAMPLE", "BEGIN", "ALWAYS",
    "THOSE", "BOTH", "PAPER", "TOGETHER", "GROUP", "OFTEN", "UNTIL", "CHILDREN", "SIDE", "FEET",
    "CAR", "MILE", "NIGHT", "WALK", "WHITE", "SEA", "BEGAN", "GROW", "TOOK", "RIVER",
    "FOUR", "CARRY", "STATE", "ONCE", "BOOK", "HEAR", "STOP", "SECOND", "LATER", "MISS",
    "IDEA", "ENOUGH", "EAT", "FACE", "WATCH", "INDIAN", "REALLY", "ALMOST", "ABOVE", "GIRL",
    "SOMETIMES", "MOUNTAIN", "CUT", "TALK", "SOON", "LIST", "SONG", "BEING", "LEAVE", "FAMILY",
    "BODY", "MUSIC", "COLOR", "STAND", "QUESTIONS", "FISH", "AREA", "MARK", "DOG", "HORSE",
    "BIRDS", "PROBLEM", "COMPLETE", "ROOM", "KNEW", "SINCE", "EVER", "PIECE", "TOLD", "USUALLY",
    "MONEY", "FRIEND", "HAPPENED", "WHOLE", "WIND", "PLACE", "MOVE", "THING", "YEAR", "LIVE",
    "GAVE", "WSB", "DD", "YOLO", "FD", "RIP", "ATH", "LOL", "CEO", "CFO",
    "IPO", "SEC", "FDA", "EARNINGS", "CALLS", "STRIKE", "EXPIRY", "THETA", "GAMMA", "DELTA",
    "VEGA", "ROCKET", "DIAMOND", "HANDS", "TENDIES", "STONKS", "HODL", "TO", "OF", "IN",
    "ON", "AT", "BY", "OR", "AS", "BE", "DO", "GO", "HE", "IF",
    "IT", "ME", "MY", "NO", "SO", "UP", "WE", "AM", "AN", "ID",
];

/// Curated allow-list of confirmed symbols: major index constituents plus
/// the retail-trading names the forum actually talks about.
const KNOWN_TICKERS: &[&str] = &[
    "TSLA", "AAPL", "GOOGL", "GOOG", "MSFT", "AMZN", "NVDA", "META", "BRK", "UNH",
    "JNJ", "JPM", "V", "PG", "HD", "MA", "PFE", "BAC", "ABBV", "KO",
    "AVGO", "PEP", "TMO", "COST", "MRK", "WMT", "CSCO", "ACN", "DHR", "VZ",
    "ADBE", "NEE", "CRM", "TXN", "LIN", "BMY", "PM", "T", "QCOM", "HON",
    "UPS", "SPGI", "LOW", "CVX", "RTX", "MDT", "UNP", "INTU", "GS", "CAT",
    "IBM", "AMD", "AMAT", "GILD", "SYK", "MU", "INTC", "ISRG", "BKNG", "ADP",
    "TJX", "VRTX", "MDLZ", "CI", "REGN", "SCHW", "MMM", "ZTS", "CB", "SO",
    "DUK", "BSX", "KLAC", "ICE", "CME", "AON", "EQIX", "PLD", "LRCX", "SHW",
    "SNPS", "ITW", "MCD", "ECL", "EL", "APD", "CDNS", "FCX", "MCHP", "ORLY",
    "MCO", "CTAS", "NXPI", "WM", "ADSK", "MAR", "IDXX", "AJG", "ROST", "KMB",
    "MSCI", "CPRT", "DXCM", "VRSK", "FAST", "BDX", "PAYX", "CMG", "ODFL", "SPY",
    "QQQ", "IWM", "VTI", "VOO", "ARKK", "SOXL", "TQQQ", "SPXL", "GME", "AMC",
    "BB", "NOK", "PLTR", "RKT", "CLOV", "WISH", "SOFI", "HOOD", "DNUT", "WEN",
    "GPRO", "IONQ", "RGTI", "QBTS", "QUBT", "LAES", "HOLO", "AEO", "F", "GE",
    "SPCE", "COIN", "RBLX", "ABNB", "ZM", "PTON", "MRNA", "BABA", "NIO", "XPEV",
    "LI", "LCID", "RIVN", "NKLA", "QS", "CHPT", "BLNK", "PLUG", "FCEL", "CLNE",
    "BE",
];

/// Immutable lexical filter used to separate real tickers from noise.
///
/// Both sets are injected at construction so tests can run against small
/// fixtures and list updates need no code changes in the extractor. A token
/// present in the known set is always accepted regardless of the rejection
/// list; callers must check `is_known` first.
#[derive(Debug, Clone)]
pub struct Lexicon {
    rejected: HashSet<String>,
    known: HashSet<String>,
}

impl Lexicon {
    pub fn new<R, K>(rejected: R, known: K) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        Self {
            rejected: rejected
                .into_iter()
                .map(|word| word.into().to_ascii_uppercase())
                .collect(),
            known: known
                .into_iter()
                .map(|word| word.into().to_ascii_uppercase())
                .collect(),
        }
    }

    /// The built-in production lists.
    pub fn builtin() -> Self {
        Self::new(REJECTED_WORDS.iter().copied(), KNOWN_TICKERS.iter().copied())
    }

    /// Membership test against the rejection list.
    pub fn is_rejected(&self, token: &str) -> bool {
        self.rejected.contains(&token.to_ascii_uppercase())
    }

    /// Membership test against the known-ticker allow-list.
    pub fn is_known(&self, token: &str) -> bool {
        self.known.contains(&token.to_ascii_uppercase())
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}
