//! Role registry: the closed vocabulary of semantic roles.
//!
//! A role is a usage slot a token can fill ("primary", "card-foreground",
//! "chart-2"). Every role has one row in [`ROLE_TABLE`] carrying its
//! influence weight, category, subcategory and display hints. Token roles
//! are sorted by descending influence, so the first role of a token is the
//! one it is best known for.

use std::fmt;

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// A semantic usage slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Background,
    Foreground,
    Card,
    CardForeground,
    Popover,
    PopoverForeground,
    Primary,
    PrimaryForeground,
    Secondary,
    SecondaryForeground,
    Muted,
    MutedForeground,
    Accent,
    AccentForeground,
    Destructive,
    DestructiveForeground,
    Success,
    SuccessForeground,
    Info,
    InfoForeground,
    Warning,
    WarningForeground,
    Border,
    Input,
    Ring,
    Chart1,
    Chart2,
    Chart3,
    Chart4,
    Chart5,
    Sidebar,
    SidebarForeground,
    SidebarPrimary,
    SidebarPrimaryForeground,
    SidebarAccent,
    SidebarAccentForeground,
    SidebarBorder,
    SidebarRing,
}

/// Broad grouping used by pickers to lay out role chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleCategory {
    Surface,
    Brand,
    Feedback,
    Chrome,
    Chart,
    Sidebar,
}

/// Whether a role is a fill or the text drawn on top of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleSubcategory {
    Base,
    Foreground,
}

/// One row of the registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleInfo {
    pub role: Role,
    pub name: &'static str,
    pub influence: f32,
    pub category: RoleCategory,
    pub subcategory: RoleSubcategory,
    pub label: &'static str,
    pub icon: &'static str,
}

const fn row(
    role: Role,
    name: &'static str,
    influence: f32,
    category: RoleCategory,
    subcategory: RoleSubcategory,
    label: &'static str,
    icon: &'static str,
) -> RoleInfo {
    RoleInfo { role, name, influence, category, subcategory, label, icon }
}

use RoleCategory as C;
use RoleSubcategory as S;

/// The registry. Row order matches the declaration order of [`Role`], so a
/// role's row is `ROLE_TABLE[role as usize]`.
#[rustfmt::skip]
pub static ROLE_TABLE: [RoleInfo; 38] = [
    row(Role::Background,               "background",                 0.98, C::Surface,  S::Base,       "Background",          "square"),
    row(Role::Foreground,               "foreground",                 0.96, C::Surface,  S::Foreground, "Foreground",          "type"),
    row(Role::Card,                     "card",                       0.70, C::Surface,  S::Base,       "Card",                "credit-card"),
    row(Role::CardForeground,           "card-foreground",            0.68, C::Surface,  S::Foreground, "Card text",           "type"),
    row(Role::Popover,                  "popover",                    0.65, C::Surface,  S::Base,       "Popover",             "message-square"),
    row(Role::PopoverForeground,        "popover-foreground",         0.63, C::Surface,  S::Foreground, "Popover text",        "type"),
    row(Role::Primary,                  "primary",                    1.00, C::Brand,    S::Base,       "Primary",             "star"),
    row(Role::PrimaryForeground,        "primary-foreground",         0.94, C::Brand,    S::Foreground, "Primary text",        "type"),
    row(Role::Secondary,                "secondary",                  0.90, C::Brand,    S::Base,       "Secondary",           "layers"),
    row(Role::SecondaryForeground,      "secondary-foreground",       0.88, C::Brand,    S::Foreground, "Secondary text",      "type"),
    row(Role::Muted,                    "muted",                      0.60, C::Surface,  S::Base,       "Muted",               "cloud"),
    row(Role::MutedForeground,          "muted-foreground",           0.58, C::Surface,  S::Foreground, "Muted text",          "type"),
    row(Role::Accent,                   "accent",                     0.85, C::Brand,    S::Base,       "Accent",              "sparkles"),
    row(Role::AccentForeground,         "accent-foreground",          0.83, C::Brand,    S::Foreground, "Accent text",         "type"),
    row(Role::Destructive,              "destructive",                0.80, C::Feedback, S::Base,       "Destructive",         "alert-octagon"),
    row(Role::DestructiveForeground,    "destructive-foreground",     0.78, C::Feedback, S::Foreground, "Destructive text",    "type"),
    row(Role::Success,                  "success",                    0.75, C::Feedback, S::Base,       "Success",             "check-circle"),
    row(Role::SuccessForeground,        "success-foreground",         0.73, C::Feedback, S::Foreground, "Success text",        "type"),
    row(Role::Info,                     "info",                       0.75, C::Feedback, S::Base,       "Info",                "info"),
    row(Role::InfoForeground,           "info-foreground",            0.73, C::Feedback, S::Foreground, "Info text",           "type"),
    row(Role::Warning,                  "warning",                    0.75, C::Feedback, S::Base,       "Warning",             "alert-triangle"),
    row(Role::WarningForeground,        "warning-foreground",         0.73, C::Feedback, S::Foreground, "Warning text",        "type"),
    row(Role::Border,                   "border",                     0.55, C::Chrome,   S::Base,       "Border",              "square-dashed"),
    row(Role::Input,                    "input",                      0.50, C::Chrome,   S::Base,       "Input",               "text-cursor-input"),
    row(Role::Ring,                     "ring",                       0.45, C::Chrome,   S::Base,       "Focus ring",          "circle-dot"),
    row(Role::Chart1,                   "chart-1",                    0.30, C::Chart,    S::Base,       "Chart 1",             "bar-chart"),
    row(Role::Chart2,                   "chart-2",                    0.29, C::Chart,    S::Base,       "Chart 2",             "bar-chart"),
    row(Role::Chart3,                   "chart-3",                    0.28, C::Chart,    S::Base,       "Chart 3",             "bar-chart"),
    row(Role::Chart4,                   "chart-4",                    0.27, C::Chart,    S::Base,       "Chart 4",             "bar-chart"),
    row(Role::Chart5,                   "chart-5",                    0.26, C::Chart,    S::Base,       "Chart 5",             "bar-chart"),
    row(Role::Sidebar,                  "sidebar",                    0.20, C::Sidebar,  S::Base,       "Sidebar",             "panel-left"),
    row(Role::SidebarForeground,        "sidebar-foreground",         0.18, C::Sidebar,  S::Foreground, "Sidebar text",        "type"),
    row(Role::SidebarPrimary,           "sidebar-primary",            0.20, C::Sidebar,  S::Base,       "Sidebar primary",     "star"),
    row(Role::SidebarPrimaryForeground, "sidebar-primary-foreground", 0.18, C::Sidebar,  S::Foreground, "Sidebar primary text","type"),
    row(Role::SidebarAccent,            "sidebar-accent",             0.20, C::Sidebar,  S::Base,       "Sidebar accent",      "sparkles"),
    row(Role::SidebarAccentForeground,  "sidebar-accent-foreground",  0.18, C::Sidebar,  S::Foreground, "Sidebar accent text", "type"),
    row(Role::SidebarBorder,            "sidebar-border",             0.15, C::Sidebar,  S::Base,       "Sidebar border",      "square-dashed"),
    row(Role::SidebarRing,              "sidebar-ring",               0.15, C::Sidebar,  S::Base,       "Sidebar ring",        "circle-dot"),
];

impl Role {
    /// Every role, in registry order.
    #[rustfmt::skip]
    pub const ALL: [Self; 38] = [
        Self::Background, Self::Foreground,
        Self::Card, Self::CardForeground,
        Self::Popover, Self::PopoverForeground,
        Self::Primary, Self::PrimaryForeground,
        Self::Secondary, Self::SecondaryForeground,
        Self::Muted, Self::MutedForeground,
        Self::Accent, Self::AccentForeground,
        Self::Destructive, Self::DestructiveForeground,
        Self::Success, Self::SuccessForeground,
        Self::Info, Self::InfoForeground,
        Self::Warning, Self::WarningForeground,
        Self::Border, Self::Input, Self::Ring,
        Self::Chart1, Self::Chart2, Self::Chart3, Self::Chart4, Self::Chart5,
        Self::Sidebar, Self::SidebarForeground,
        Self::SidebarPrimary, Self::SidebarPrimaryForeground,
        Self::SidebarAccent, Self::SidebarAccentForeground,
        Self::SidebarBorder, Self::SidebarRing,
    ];

    /// The five chart slots, in order.
    pub const CHARTS: [Self; 5] = [Self::Chart1, Self::Chart2, Self::Chart3, Self::Chart4, Self::Chart5];

    /// This role's registry row.
    #[inline]
    #[must_use]
    pub fn info(self) -> &'static RoleInfo {
        &ROLE_TABLE[self as usize]
    }

    /// Kebab-case name, as written in definitions and stylesheets.
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    #[inline]
    #[must_use]
    pub fn influence(self) -> f32 {
        self.info().influence
    }

    /// Look a role up by its kebab-case name. Surrounding whitespace and
    /// ASCII case are ignored.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        ROLE_TABLE
            .iter()
            .find(|row| row.name.eq_ignore_ascii_case(name))
            .map(|row| row.role)
    }

    /// The `-foreground` companion of a fill role, if it has one.
    #[must_use]
    pub const fn foreground(self) -> Option<Self> {
        Some(match self {
            Self::Background => Self::Foreground,
            Self::Card => Self::CardForeground,
            Self::Popover => Self::PopoverForeground,
            Self::Primary => Self::PrimaryForeground,
            Self::Secondary => Self::SecondaryForeground,
            Self::Muted => Self::MutedForeground,
            Self::Accent => Self::AccentForeground,
            Self::Destructive => Self::DestructiveForeground,
            Self::Success => Self::SuccessForeground,
            Self::Info => Self::InfoForeground,
            Self::Warning => Self::WarningForeground,
            Self::Sidebar => Self::SidebarForeground,
            Self::SidebarPrimary => Self::SidebarPrimaryForeground,
            Self::SidebarAccent => Self::SidebarAccentForeground,
            _ => return None,
        })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Sort roles by descending influence, keeping input order for ties, and
/// drop repeats (the first occurrence is kept).
#[must_use]
pub fn sort_roles(roles: &[Role]) -> Vec<Role> {
    let mut out: Vec<Role> = Vec::with_capacity(roles.len());
    for &role in roles {
        if !out.contains(&role) {
            out.push(role);
        }
    }
    out.sort_by(|a, b| b.influence().total_cmp(&a.influence()));
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
