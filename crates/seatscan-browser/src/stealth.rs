//! Stealth evasion JavaScript injected into pages for vendors whose default
//! profile gets blocked. Based on puppeteer-extra-plugin-stealth techniques.

pub(crate) const STEALTH_SCRIPTS: &[&str] = &[
    // Remove webdriver property
    r"
    Object.defineProperty(navigator, 'webdriver', {
        get: () => undefined,
        configurable: true
    });
    ",
    // Fix chrome object
    r"
    window.chrome = {
        runtime: {},
        loadTimes: function() {},
        csi: function() {},
        app: {}
    };
    ",
    // Fix languages
    r"
    Object.defineProperty(navigator, 'languages', {
        get: () => ['en-US', 'en'],
        configurable: true
    });
    ",
    // Remove automation-related properties
    r"
    delete window.cdc_adoQpoasnfa76pfcZLmcfl_Array;
    delete window.cdc_adoQpoasnfa76pfcZLmcfl_Promise;
    delete window.cdc_adoQpoasnfa76pfcZLmcfl_Symbol;
    ",
];
