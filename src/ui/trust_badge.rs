use std::fmt::{self, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::escape;
use crate::error::AppError;

/// 商家信任等级
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrustLevel {
    Informal,
    Formal,
    Verified,
    CommunityTrusted,
}

/// 徽章尺寸
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeSize {
    Sm,
    #[default]
    Md,
    Lg,
}

/// 等级对应的图标、文案和颜色
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BadgeStyle {
    pub icon: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}

impl TrustLevel {
    pub const ALL: [TrustLevel; 4] = [
        TrustLevel::Informal,
        TrustLevel::Formal,
        TrustLevel::Verified,
        TrustLevel::CommunityTrusted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TrustLevel::Informal => "INFORMAL",
            TrustLevel::Formal => "FORMAL",
            TrustLevel::Verified => "VERIFIED",
            TrustLevel::CommunityTrusted => "COMMUNITY_TRUSTED",
        }
    }

    pub fn style(self) -> BadgeStyle {
        match self {
            TrustLevel::Informal => BadgeStyle {
                icon: "🏪",
                label: "Informal",
                description: "Operating informally",
                color: "#6b7280",
            },
            TrustLevel::Formal => BadgeStyle {
                icon: "🏢",
                label: "Registered",
                description: "Formally registered business",
                color: "#2563eb",
            },
            TrustLevel::Verified => BadgeStyle {
                icon: "✔",
                label: "Verified",
                description: "Identity and documents verified",
                color: "#16a34a",
            },
            TrustLevel::CommunityTrusted => BadgeStyle {
                icon: "🤝",
                label: "Community Trusted",
                description: "Vouched for by the community",
                color: "#9333ea",
            },
        }
    }
}

impl FromStr for TrustLevel {
    type Err = AppError;

    /// 接受 `COMMUNITY_TRUSTED`、`community-trusted` 等写法
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_uppercase().replace('-', "_");
        TrustLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == token)
            .ok_or_else(|| AppError::validation(format!("unknown trust level '{}'", s)))
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BadgeSize {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeSize::Sm => "sm",
            BadgeSize::Md => "md",
            BadgeSize::Lg => "lg",
        }
    }
}

impl FromStr for BadgeSize {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sm" => Ok(BadgeSize::Sm),
            "md" => Ok(BadgeSize::Md),
            "lg" => Ok(BadgeSize::Lg),
            _ => Err(AppError::validation(format!("unknown badge size '{}'", s))),
        }
    }
}

/// 信任徽章
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrustBadge {
    pub level: TrustLevel,
    pub size: BadgeSize,
}

impl TrustBadge {
    pub fn new(level: TrustLevel) -> Self {
        TrustBadge {
            level,
            size: BadgeSize::default(),
        }
    }

    pub fn size(mut self, size: BadgeSize) -> Self {
        self.size = size;
        self
    }

    pub fn render(&self) -> String {
        let style = self.level.style();
        let mut html = String::new();
        let _ = write!(
            html,
            r#"<span class="trust-badge trust-badge--{size}" data-level="{level}" style="--badge-color: {color}" title="{title}">"#,
            size = self.size.as_str(),
            level = self.level.as_str(),
            color = style.color,
            title = escape(style.description),
        );
        let _ = write!(
            html,
            r#"<span class="trust-badge__icon" aria-hidden="true">{}</span><span class="trust-badge__label">{}</span></span>"#,
            style.icon,
            escape(style.label),
        );
        html
    }
}
