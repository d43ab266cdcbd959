//! Call-to-action banners

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BannerVariant {
    #[default]
    Newsletter,
    Premium,
    Podcast,
}

impl BannerVariant {
    pub fn next(self) -> Self {
        match self {
            BannerVariant::Newsletter => BannerVariant::Premium,
            BannerVariant::Premium => BannerVariant::Podcast,
            BannerVariant::Podcast => BannerVariant::Newsletter,
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            BannerVariant::Newsletter => "Get the best stories in your inbox",
            BannerVariant::Premium => "Go deeper with Pressroom Premium",
            BannerVariant::Podcast => "Every article, narrated",
        }
    }

    pub fn body(self) -> &'static str {
        match self {
            BannerVariant::Newsletter => "One thoughtful email a week. No noise, unsubscribe any time.",
            BannerVariant::Premium => "Unlimited archive access, member-only essays and early releases.",
            BannerVariant::Podcast => "Listen to long reads on your commute at any speed you like.",
        }
    }

    pub fn action_label(self) -> &'static str {
        match self {
            BannerVariant::Newsletter => "Subscribe",
            BannerVariant::Premium => "Start free trial",
            BannerVariant::Podcast => "Start listening",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BannerState {
    pub variant: BannerVariant,
    pub dismissed: bool,
}

impl BannerState {
    pub fn is_visible(&self) -> bool {
        !self.dismissed
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    pub fn rotate(&mut self) -> BannerVariant {
        self.variant = self.variant.next();
        self.dismissed = false;
        self.variant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_brings_back_a_dismissed_banner() {
        let mut banner = BannerState::default();
        banner.dismiss();
        assert!(!banner.is_visible());
        assert_eq!(banner.rotate(), BannerVariant::Premium);
        assert!(banner.is_visible());
    }

    #[test]
    fn variants_cycle() {
        let v = BannerVariant::Newsletter;
        assert_eq!(v.next().next().next(), v);
    }
}
