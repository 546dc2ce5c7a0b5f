//! Shape fixtures for the provider's documented response bodies.
//!
//! Built once per run and passed by reference into each `formats` check.
//! These are deliberately *open* schemas: the provider adds response
//! fields between releases, and the suite must keep passing when it
//! does. Only the documented keys are pinned.

use vox_shape::SchemaNode;

/// Shape of a `voxcloud_create` response body.
///
/// ```json
/// {"device": {"id": "...", "last_update": "..."}, "stat": "ok"}
/// ```
pub fn server_format() -> SchemaNode {
    SchemaNode::map([
        (
            "device",
            SchemaNode::map([
                ("id", SchemaNode::string()),
                ("last_update", SchemaNode::time()),
            ]),
        ),
        ("stat", SchemaNode::string()),
    ])
}

/// Shape of a `devices_list` response body: the full device record
/// array plus the `stat` marker.
///
/// `drives.position` is nullable — unracked devices report null.
/// `access_methods` is asserted as a sequence only; its element shape
/// varies by device class and is not pinned.
pub fn devices_format() -> SchemaNode {
    SchemaNode::map([
        ("devices", SchemaNode::seq(device_format())),
        ("stat", SchemaNode::string()),
    ])
}

/// Shape of a single device record inside `devices_list`.
fn device_format() -> SchemaNode {
    SchemaNode::map([
        ("access_methods", SchemaNode::seq_any()),
        ("description", SchemaNode::string()),
        (
            "drives",
            SchemaNode::map([
                ("position", SchemaNode::nullable(SchemaNode::integer())),
                ("size", SchemaNode::integer()),
            ]),
        ),
        ("id", SchemaNode::string()),
        (
            "ipassignments",
            SchemaNode::seq(SchemaNode::map([
                ("description", SchemaNode::string()),
                ("id", SchemaNode::string()),
                ("type", SchemaNode::string()),
                ("value", SchemaNode::string()),
            ])),
        ),
        ("label", SchemaNode::string()),
        (
            "location",
            SchemaNode::map([
                ("cage", id_value_format()),
                (
                    "facility",
                    SchemaNode::map([
                        ("code", SchemaNode::string()),
                        ("id", SchemaNode::string()),
                        ("value", SchemaNode::string()),
                    ]),
                ),
                ("rack", id_value_format()),
                ("row", id_value_format()),
                ("zone", id_value_format()),
            ]),
        ),
        ("memory", SchemaNode::map([("size", SchemaNode::integer())])),
        ("model", id_value_format()),
        (
            "operating_system",
            SchemaNode::map([
                ("architecture", SchemaNode::integer()),
                ("name", SchemaNode::string()),
            ]),
        ),
        ("power_consumption", SchemaNode::string()),
        (
            "processor",
            SchemaNode::map([("cores", SchemaNode::integer())]),
        ),
        ("status", SchemaNode::string()),
        ("type", id_value_format()),
    ])
}

/// The provider's recurring `{"id": ..., "value": ...}` sub-record.
fn id_value_format() -> SchemaNode {
    SchemaNode::map([("id", SchemaNode::string()), ("value", SchemaNode::string())])
}
