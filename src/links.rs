//! Sidebar navigation data
//!
//! Static list of external links; the driver renders one anchor per entry.

/// One sidebar entry
#[derive(Debug, Clone, Copy)]
pub struct NavLink {
    pub name: &'static str,
    pub url: &'static str,
    pub icon: &'static str,
}

/// Sidebar entries, in display order
pub const NAV_LINKS: &[NavLink] = &[
    NavLink {
        name: "SWITCHBOARD DOCS",
        url: "https://docs.switchboard.xyz/",
        icon: "📚",
    },
    NavLink {
        name: "SWITCHBOARD DISCORD",
        url: "https://discord.gg/PQRxfYxV",
        icon: "💬",
    },
    NavLink {
        name: "SWITCHBOARD EXPLORER",
        url: "https://explorer.switchboardlabs.xyz/",
        icon: "🔍",
    },
    NavLink {
        name: "SWITCHBOARD WEBSITE",
        url: "https://switchboard.xyz/",
        icon: "🌐",
    },
    NavLink {
        name: "FOUNDATION TWITTER",
        url: "https://x.com/SwitchboardFDN",
        icon: "🏛️",
    },
    NavLink {
        name: "TWITTER",
        url: "https://x.com/switchboardxyz",
        icon: "𝕏",
    },
    NavLink {
        name: "ORACLE BENCHMARK",
        url: "https://thepriceisright.xyz/",
        icon: "📊",
    },
];
