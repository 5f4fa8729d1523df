//! Fixed parameters for the attribute scanner and the WikiSync prober
//!
//! Neither tool takes flags or reads a config file; everything tunable lives here
//! and flows into [`crate::probe::ProbeConfig::default`].

use std::time::Duration;

/// Monster dump read by `inspect_attributes`, relative to the working directory
pub const MONSTER_DATA_PATH: &str = "bosses_complete.json";

/// Field on a monster record holding its attribute tags
pub const ATTRIBUTES_FIELD: &str = "attributes";

/// Host the prober connects to. `localhost` lets the resolver pick IPv4 or IPv6.
pub const PROBE_HOST: &str = "localhost";

/// First port the WikiSync plugin may listen on
pub const PORT_START: u16 = 37767;

/// Last port (inclusive) the WikiSync plugin may listen on
pub const PORT_END: u16 = 37776;

/// Origin the plugin trusts
pub const ORIGIN: &str = "https://tools.runescape.wiki";

/// Browser user agent sent alongside the origin
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Candidate request bodies, sent in this order once connected
pub const DISCOVERY_REQUESTS: [&str; 5] = [
    r#"{"type":"REQUEST_PLAYER_DATA"}"#,
    r#"{"type":"GET_PLAYER"}"#,
    r#"{"type":"EQUIPMENT"}"#,
    r#"{"action":"get_equipment"}"#,
    r#"{"_wsType":"GetPlayer"}"#,
];

/// Pause after each request so responses can arrive before the next send
pub const SEND_INTERVAL: Duration = Duration::from_secs(1);

/// Passive listening time after the last request
pub const LISTEN_WINDOW: Duration = Duration::from_secs(10);

/// Upper bound for flushing the close frame
pub const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Upper bound for the TCP connect plus websocket handshake on a single port
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Root directory for saved payloads
pub const OUTPUT_ROOT: &str = "data";

/// Protocol name, used as the subdirectory under [`OUTPUT_ROOT`]
pub const PROTOCOL_NAME: &str = "wikisync";

/// Username used until the plugin reports one
pub const DEFAULT_USERNAME: &str = "unknown_player";

/// Discriminator field on plugin messages
pub const WS_TYPE_FIELD: &str = "_wsType";

/// Discriminator value for username change notifications
pub const WS_TYPE_USERNAME_CHANGED: &str = "UsernameChanged";

/// Discriminator value for player data payloads
pub const WS_TYPE_GET_PLAYER: &str = "GetPlayer";

/// Timestamp embedded in saved file names, second resolution
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Received frames longer than this are truncated in the log
pub const LOG_PREVIEW_CHARS: usize = 200;
