//! Events stream

use super::{base, RestStream};
use crate::context::Context;
use crate::schema::{JsonSchema, SchemaProperty};
use crate::types::UrlParams;
use std::sync::LazyLock;

/// Asks the API to inline the caller's bookmark state on every event
const EXPAND: &str = "bookmark_info";

fn text_html() -> SchemaProperty {
    SchemaProperty::object([
        ("text", SchemaProperty::string()),
        ("html", SchemaProperty::string()),
    ])
}

fn zoned_datetime() -> SchemaProperty {
    SchemaProperty::object([
        (
            "timezone",
            SchemaProperty::string().with_description("The timezone"),
        ),
        (
            "utc",
            SchemaProperty::datetime().with_description("The time relative to UTC"),
        ),
        (
            "local",
            SchemaProperty::datetime().with_description("The time in the timezone of the event"),
        ),
    ])
}

fn ticket_price() -> SchemaProperty {
    SchemaProperty::object([
        (
            "currency",
            SchemaProperty::string()
                .with_description("The ISO 4217 3-character code of a currency"),
        ),
        (
            "value",
            SchemaProperty::number().with_description(
                "The integer value of units of the minor unit of the currency \
                 (e.g. cents for US dollars)",
            ),
        ),
        (
            "major_value",
            SchemaProperty::string().with_description(
                "The integer value of units of the major unit of the currency \
                 (e.g. dollars for US dollars)",
            ),
        ),
        (
            "display",
            SchemaProperty::string().with_description(
                "Provided for your convenience; its formatting may change depending on \
                 the locale you query the API with (for example, commas for decimal \
                 separators in European locales).",
            ),
        ),
    ])
}

static SCHEMA: LazyLock<JsonSchema> = LazyLock::new(|| {
    JsonSchema::from_properties([
        ("id", SchemaProperty::string().with_description("Event id")),
        ("name", text_html().with_description("Event name")),
        (
            "summary",
            SchemaProperty::string().with_description(
                "Event summary. This is a plaintext field and will have any supplied HTML \
                 removed from it. Maximum of 140 characters, mutually exclusive with \
                 description.",
            ),
        ),
        (
            "description",
            text_html().with_description(
                "(DEPRECATED) Event description (contents of the event page). May be long \
                 and have significant formatting.",
            ),
        ),
        (
            "start",
            zoned_datetime().with_description("Start date/time of the event"),
        ),
        (
            "end",
            zoned_datetime().with_description("End date/time of the event"),
        ),
        (
            "url",
            SchemaProperty::uri()
                .with_description("The URL to the event page for this event on Eventbrite"),
        ),
        (
            "vanity_url",
            SchemaProperty::string().with_description(
                "The vanity URL to the event page for this event on Eventbrite",
            ),
        ),
        (
            "created",
            SchemaProperty::datetime().with_description("When the event was created"),
        ),
        (
            "changed",
            SchemaProperty::datetime().with_description("When the event was last changed"),
        ),
        (
            "published",
            SchemaProperty::datetime().with_description("When the event was first published"),
        ),
        (
            "status",
            SchemaProperty::string().with_description("Status of the event"),
        ),
        (
            "currency",
            SchemaProperty::string()
                .with_description("The ISO 4217 currency code for this event"),
        ),
        (
            "online_event",
            SchemaProperty::boolean().with_description(
                "If this event doesn't have a venue and is only held online",
            ),
        ),
        (
            "organization_id",
            SchemaProperty::string().with_description("Organization owning the event"),
        ),
        (
            "organizer_id",
            SchemaProperty::string().with_description("Organizer of the event"),
        ),
        (
            "logo_id",
            SchemaProperty::string().with_description("Image ID of the event logo"),
        ),
        (
            "venue_id",
            SchemaProperty::string().with_description("Event venue ID"),
        ),
        (
            "format_id",
            SchemaProperty::string().with_description("Event format"),
        ),
        (
            "category_id",
            SchemaProperty::string().with_description("Event category"),
        ),
        (
            "subcategory_id",
            SchemaProperty::string().with_description("Event subcategory"),
        ),
        (
            "music_properties",
            SchemaProperty::object([
                (
                    "age_restriction",
                    SchemaProperty::string()
                        .with_description("Minimum age requirement of event attendees."),
                ),
                (
                    "presented_by",
                    SchemaProperty::string().with_description("Main music event sponsor."),
                ),
                (
                    "door_time",
                    SchemaProperty::datetime().with_description(
                        "Time relative to UTC that the doors are opened to allow people in \
                         the day of the event.",
                    ),
                ),
            ])
            .with_description(
                "This is an object of properties that detail dimensions of music events.",
            ),
        ),
        (
            "bookmark_info",
            SchemaProperty::object([(
                "bookmarked",
                SchemaProperty::boolean().with_description("User saved the event or not."),
            )])
            .with_description("Whether the requesting user bookmarked the event"),
        ),
        ("refund_policy", SchemaProperty::string()),
        (
            "listed",
            SchemaProperty::boolean()
                .with_description("Is this event publicly searchable on Eventbrite?"),
        ),
        (
            "shareable",
            SchemaProperty::boolean()
                .with_description("Can this event show social sharing buttons?"),
        ),
        (
            "invite_only",
            SchemaProperty::boolean()
                .with_description("Can only people with invites see the event page?"),
        ),
        (
            "show_remaining",
            SchemaProperty::boolean()
                .with_description("Should the event page show the number of tickets left?"),
        ),
        (
            "capacity",
            SchemaProperty::integer()
                .with_description("Maximum number of people who can attend."),
        ),
        (
            "capacity_is_custom",
            SchemaProperty::boolean().with_description(
                "If True, the value of capacity is a custom-set value; if False, it's a \
                 calculated value of the total of all ticket capacities.",
            ),
        ),
        (
            "tx_time_limit",
            SchemaProperty::string()
                .with_description("Maximum duration (in seconds) of a transaction"),
        ),
        (
            "hide_start_date",
            SchemaProperty::boolean().with_description("Show when event starts"),
        ),
        (
            "hide_end_date",
            SchemaProperty::boolean().with_description("Hide when event ends"),
        ),
        (
            "locale",
            SchemaProperty::string().with_description("The event Locale"),
        ),
        (
            "is_locked",
            SchemaProperty::boolean().with_description("If the event is locked"),
        ),
        (
            "privacy_setting",
            SchemaProperty::string().with_description("Privacy setting of the event"),
        ),
        (
            "is_externally_ticketed",
            SchemaProperty::boolean().with_description("If the event is externally ticketed"),
        ),
        (
            "external_ticketing",
            SchemaProperty::object([
                (
                    "external_url",
                    SchemaProperty::string()
                        .with_description("The URL clients can follow to purchase tickets"),
                ),
                (
                    "ticketing_provider_name",
                    SchemaProperty::string()
                        .with_description("The name of the ticketing provider"),
                ),
                (
                    "is_free",
                    SchemaProperty::boolean().with_description(
                        "Whether this is a free event. Mutually exclusive with ticket price \
                         range.",
                    ),
                ),
                (
                    "minimum_ticket_price",
                    ticket_price()
                        .with_description("The lowest price at which tickets are being sold."),
                ),
                (
                    "maximum_ticket_price",
                    ticket_price()
                        .with_description("The highest price at which tickets are being sold."),
                ),
                (
                    "sales_start",
                    SchemaProperty::datetime().with_description("When sales start"),
                ),
                (
                    "sales_end",
                    SchemaProperty::datetime().with_description("When sales end"),
                ),
            ]),
        ),
        (
            "is_series",
            SchemaProperty::boolean().with_description("If the event is part of a series"),
        ),
        (
            "is_series_parent",
            SchemaProperty::boolean().with_description(
                "If the event is part of a series and is the series parent",
            ),
        ),
        (
            "series_id",
            SchemaProperty::string().with_description(
                "If the event is part of a series, this is the event id of the series parent",
            ),
        ),
        (
            "is_reserved_seating",
            SchemaProperty::boolean()
                .with_description("If the events has been set to have reserved seatings"),
        ),
        (
            "show_pick_a_seat",
            SchemaProperty::boolean().with_description("Enables to show pick a seat option"),
        ),
        (
            "show_seatmap_thumbnail",
            SchemaProperty::boolean().with_description("Enables to show seat map thumbnail"),
        ),
        (
            "show_colors_in_seatmap_thumbnail",
            SchemaProperty::boolean().with_description(
                "For reserved seating event, if venue map thumbnail should have colors on \
                 the event page.",
            ),
        ),
        (
            "is_free",
            SchemaProperty::boolean().with_description("Allows to set a free event"),
        ),
        (
            "source",
            SchemaProperty::string().with_description("Source of the event (defaults to API)"),
        ),
        ("version", SchemaProperty::string()),
        // Declared boolean although the API sends the endpoint URL as a string.
        (
            "resource_uri",
            SchemaProperty::boolean().with_description(
                "Is an absolute URL to the API endpoint that will return you the canonical \
                 representation of the event.",
            ),
        ),
        (
            "event_sales_status",
            SchemaProperty::object([
                (
                    "sales_status",
                    SchemaProperty::string().with_description("Sales status of the event"),
                ),
                (
                    "start_sales_date",
                    zoned_datetime().with_description("When sales start"),
                ),
                (
                    "message",
                    SchemaProperty::string().with_description(
                        "Custom message associated with the current event sales status",
                    ),
                ),
                (
                    "message_type",
                    SchemaProperty::string().with_description("Message type"),
                ),
                (
                    "message_code",
                    SchemaProperty::string().with_description("Message code"),
                ),
            ])
            .with_description("Additional data about the sales status of the event (optional)."),
        ),
        (
            "checkout_settings",
            SchemaProperty::object([
                (
                    "created",
                    SchemaProperty::datetime()
                        .with_description("When the checkout settings object was created"),
                ),
                (
                    "changed",
                    SchemaProperty::datetime()
                        .with_description("When the checkout settings object was last changed"),
                ),
                (
                    "country_code",
                    SchemaProperty::string().with_description(
                        "The ISO 3166 alpha-2 code of the country within which these checkout \
                         settings can apply.",
                    ),
                ),
                (
                    "currency_code",
                    SchemaProperty::string().with_description(
                        "The ISO 4217 3-character code of the currency for which these \
                         checkout settings can apply.",
                    ),
                ),
                (
                    "checkout_method",
                    SchemaProperty::string().with_description(
                        "The checkout method to use for completing consumer payment for \
                         tickets or other goods. Set of possible values [paypal, eventbrite, \
                         authnet, offline].",
                    ),
                ),
                (
                    "offline_settings",
                    SchemaProperty::array(SchemaProperty::object([
                        (
                            "payment_method",
                            SchemaProperty::string()
                                .with_description("Set of possible values: [CASH, CHECK, INVOICE]"),
                        ),
                        ("instructions", SchemaProperty::string()),
                    ]))
                    .with_description("Offline checkout settings."),
                ),
                (
                    "user_instrument_vault_id",
                    SchemaProperty::string().with_description(
                        "The merchant account user instrument ID for the checkout method. Only \
                         specify this value for PayPal and Authorize.net checkout settings.",
                    ),
                ),
            ])
            .with_description("Additional data about the checkout settings of the Event."),
        ),
    ])
});

/// Events of one organization, scoped by `organization_id`
#[derive(Debug, Clone, Copy, Default)]
pub struct Events;

impl RestStream for Events {
    fn name(&self) -> &'static str {
        "events"
    }

    fn path(&self) -> &'static str {
        "/v3/organizations/{organization_id}/events/"
    }

    fn records_path(&self) -> &'static str {
        "$.events[*]"
    }

    fn primary_keys(&self) -> &'static [&'static str] {
        &["id"]
    }

    fn schema(&self) -> &JsonSchema {
        &SCHEMA
    }

    fn parent_stream(&self) -> Option<&'static str> {
        Some("organizations")
    }

    fn url_params(&self, _context: Option<&Context>, token: Option<&str>) -> UrlParams {
        let mut params = base::base_url_params(token);
        params.insert("expand".to_string(), EXPAND.to_string());
        params
    }
}
