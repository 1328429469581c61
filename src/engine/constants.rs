// Constants for the tree engine

/// Rough size of one node (tree node + flat record) in bytes, for history budgeting
pub const BYTES_PER_NODE: usize = 64;

/// Fixed per-snapshot cost in bytes (highlight, map header, flags)
pub const SNAPSHOT_OVERHEAD: usize = 128;

/// Default snapshot history budget: 256 MiB
pub const DEFAULT_HISTORY_LIMIT: usize = 256 * 1024 * 1024;

/// Default delay between steps in play mode
pub const DEFAULT_PLAY_INTERVAL_MS: u64 = 700;

/// Named demo layouts, level order, `None` = no node
pub const DEMOS: &[(&str, &[Option<i64>])] = &[
    (
        "bst",
        &[
            Some(50),
            Some(30),
            Some(70),
            Some(20),
            Some(40),
            Some(60),
            Some(80),
        ],
    ),
    (
        "complete",
        &[
            Some(1),
            Some(2),
            Some(3),
            Some(4),
            Some(5),
            Some(6),
            Some(7),
            Some(8),
            Some(9),
        ],
    ),
    ("skewed", &[Some(1), None, Some(2), None, Some(3), None, Some(4)]),
    (
        "sparse",
        &[
            Some(8),
            Some(3),
            Some(10),
            Some(1),
            Some(6),
            None,
            Some(14),
            None,
            None,
            Some(4),
            Some(7),
            Some(13),
        ],
    ),
];
