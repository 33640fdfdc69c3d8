pub struct FeatureFlag {
    #[expiry("02-03-2022")]
    pub feature_flagging_enabled: bool,
}

impl FeatureFlag {
    #[expiry("02-04-2023")]
    pub fn is_fast_enabled(&self) -> bool {
        true
    }

    #[expiry("02-05-2023")]
    pub fn is_slow_enabled(&self) -> bool {
        true
    }

    #[expiry("02-03-2099")]
    pub fn is_new_checkout_enabled(&self) -> bool {
        false
    }
}
