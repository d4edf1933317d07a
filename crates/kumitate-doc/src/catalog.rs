//! Built-in block catalog for the marketing site.
//!
//! Declaration order here is the palette order.

use kumitate_types::{
    BlockType, BlockTypeDefinition, Category, FieldSpec, StyleSpec, Value, record,
};

fn section_styles(def: BlockTypeDefinition) -> BlockTypeDefinition {
    def.style(StyleSpec::color("background", "Background"))
        .style(StyleSpec::color("text_color", "Text color"))
        .style(StyleSpec::spacing("padding", "Padding").with_default(64.0))
}

fn cta_fields(def: BlockTypeDefinition, label: &str) -> BlockTypeDefinition {
    def.field(FieldSpec::short_text("cta_label", "Button label").with_default(label))
        .field(FieldSpec::url("cta_url", "Button link").with_default(Value::reference("/contact")))
}

/// Every built-in block type definition, in palette order.
pub fn definitions() -> Vec<BlockTypeDefinition> {
    vec![
        BlockTypeDefinition::new(BlockType::Navbar, "Navigation Bar", Category::Navigation)
            .describe("Logo and top-level menu links")
            .field(FieldSpec::image("logo", "Logo"))
            .field(FieldSpec::short_text("brand", "Brand name").with_default("Company"))
            .field(
                FieldSpec::repeater(
                    "links",
                    "Menu links",
                    vec![FieldSpec::short_text("label", "Label"), FieldSpec::url("href", "Link")],
                )
                .with_default(vec![
                    record([("label", Value::text("Services")), ("href", Value::reference("/services"))]),
                    record([("label", Value::text("Team")), ("href", Value::reference("/team"))]),
                    record([("label", Value::text("Contact")), ("href", Value::reference("/contact"))]),
                ]),
            )
            .field(FieldSpec::boolean("sticky", "Stick to top").with_default(true))
            .style(StyleSpec::color("background", "Background"))
            .style(StyleSpec::shadow("shadow", "Shadow")),
        cta_fields(
            section_styles(
                BlockTypeDefinition::new(BlockType::Hero, "Hero Banner", Category::Hero)
                    .describe("Large headline with supporting text, image, and call to action")
                    .field(FieldSpec::short_text("title", "Headline").with_default("Build something remarkable"))
                    .field(
                        FieldSpec::long_text("subtitle", "Subheadline")
                            .with_default("We help teams ship digital products that customers love."),
                    )
                    .field(FieldSpec::image("image", "Background image"))
                    .style(StyleSpec::alignment("align", "Alignment").with_default("center")),
            ),
            "Get started",
        ),
        section_styles(
            BlockTypeDefinition::new(BlockType::FeaturesGrid, "Features Grid", Category::Content)
                .describe("Grid of feature cards with icon, title, and description")
                .field(FieldSpec::short_text("title", "Section title").with_default("Why choose us"))
                .field(
                    FieldSpec::repeater(
                        "features",
                        "Features",
                        vec![
                            FieldSpec::icon("icon", "Icon"),
                            FieldSpec::short_text("title", "Title"),
                            FieldSpec::long_text("description", "Description"),
                        ],
                    )
                    .with_default(vec![
                        record([
                            ("icon", Value::reference("bolt")),
                            ("title", Value::text("Fast")),
                            ("description", Value::text("Pages that load in a blink.")),
                        ]),
                        record([
                            ("icon", Value::reference("shield")),
                            ("title", Value::text("Secure")),
                            ("description", Value::text("Best practices baked in.")),
                        ]),
                        record([
                            ("icon", Value::reference("heart")),
                            ("title", Value::text("Loved")),
                            ("description", Value::text("Trusted by hundreds of clients.")),
                        ]),
                    ]),
                )
                .field(FieldSpec::number("columns", "Columns").with_default(3.0))
                .style(StyleSpec::border("card_border", "Card border"))
                .style(StyleSpec::shadow("card_shadow", "Card shadow")),
        ),
        BlockTypeDefinition::new(BlockType::Text, "Text", Category::Content)
            .describe("Rich text paragraph section")
            .field(FieldSpec::short_text("heading", "Heading"))
            .field(FieldSpec::rich_text("body", "Body").with_default("<p>Tell your story here.</p>"))
            .style(StyleSpec::alignment("align", "Alignment").with_default("left"))
            .style(StyleSpec::spacing("padding", "Padding")),
        BlockTypeDefinition::new(BlockType::Image, "Image", Category::Media)
            .describe("Single image with optional caption")
            .field(FieldSpec::image("src", "Image"))
            .field(FieldSpec::short_text("alt", "Alt text").with_default(""))
            .field(FieldSpec::short_text("caption", "Caption"))
            .style(StyleSpec::border("border", "Border"))
            .style(StyleSpec::shadow("shadow", "Shadow")),
        BlockTypeDefinition::new(BlockType::Gallery, "Gallery", Category::Media)
            .describe("Grid of images, portfolio or product shots")
            .field(FieldSpec::short_text("title", "Title"))
            .field(FieldSpec::repeater(
                "images",
                "Images",
                vec![FieldSpec::image("src", "Image"), FieldSpec::short_text("alt", "Alt text")],
            ))
            .field(FieldSpec::select("layout", "Layout", ["grid", "masonry", "carousel"]).with_default("grid"))
            .style(StyleSpec::spacing("gap", "Gap").with_default(16.0)),
        BlockTypeDefinition::new(BlockType::Video, "Video", Category::Media)
            .describe("Embedded video player")
            .field(FieldSpec::url("url", "Video URL"))
            .field(FieldSpec::image("poster", "Poster image"))
            .field(FieldSpec::boolean("autoplay", "Autoplay").with_default(false))
            .style(StyleSpec::border("border", "Border")),
        section_styles(
            BlockTypeDefinition::new(BlockType::PricingTable, "Pricing Table", Category::Commerce)
                .describe("Compare plans with price, features, and signup button")
                .field(FieldSpec::short_text("title", "Section title").with_default("Simple pricing"))
                .field(
                    FieldSpec::repeater(
                        "plans",
                        "Plans",
                        vec![
                            FieldSpec::short_text("name", "Plan name"),
                            FieldSpec::number("price", "Monthly price"),
                            FieldSpec::long_text("features", "Features (one per line)"),
                            FieldSpec::boolean("featured", "Highlight"),
                            FieldSpec::url("cta_url", "Signup link"),
                        ],
                    )
                    .with_default(vec![
                        record([
                            ("name", Value::text("Starter")),
                            ("price", Value::Number(19.0)),
                            ("features", Value::text("1 site\nEmail support")),
                            ("featured", Value::Bool(false)),
                        ]),
                        record([
                            ("name", Value::text("Business")),
                            ("price", Value::Number(49.0)),
                            ("features", Value::text("5 sites\nPriority support")),
                            ("featured", Value::Bool(true)),
                        ]),
                    ]),
                )
                .field(FieldSpec::select("currency", "Currency", ["USD", "EUR", "GBP", "IDR"]).with_default("USD"))
                .style(StyleSpec::color("accent", "Accent color")),
        ),
        section_styles(
            BlockTypeDefinition::new(BlockType::Testimonials, "Testimonials", Category::SocialProof)
                .describe("Customer quotes with name and photo")
                .field(FieldSpec::short_text("title", "Section title").with_default("What our clients say"))
                .field(FieldSpec::repeater(
                    "quotes",
                    "Quotes",
                    vec![
                        FieldSpec::long_text("quote", "Quote"),
                        FieldSpec::short_text("author", "Author"),
                        FieldSpec::short_text("role", "Role"),
                        FieldSpec::image("avatar", "Photo"),
                    ],
                )),
        ),
        section_styles(
            BlockTypeDefinition::new(BlockType::Stats, "Stats", Category::SocialProof)
                .describe("Headline numbers such as clients served or years in business")
                .field(
                    FieldSpec::repeater(
                        "items",
                        "Stats",
                        vec![FieldSpec::short_text("value", "Value"), FieldSpec::short_text("label", "Label")],
                    )
                    .with_default(vec![
                        record([("value", Value::text("250+")), ("label", Value::text("Projects"))]),
                        record([("value", Value::text("10")), ("label", Value::text("Years"))]),
                    ]),
                ),
        ),
        BlockTypeDefinition::new(BlockType::LogoCloud, "Logo Cloud", Category::SocialProof)
            .describe("Row of partner or client logos")
            .field(FieldSpec::short_text("title", "Title").with_default("Trusted by"))
            .field(FieldSpec::repeater(
                "logos",
                "Logos",
                vec![FieldSpec::image("src", "Logo"), FieldSpec::short_text("name", "Name")],
            ))
            .field(FieldSpec::boolean("grayscale", "Grayscale").with_default(true)),
        section_styles(
            BlockTypeDefinition::new(BlockType::Team, "Team", Category::Content)
                .describe("Team members with photo, name, and role")
                .field(FieldSpec::short_text("title", "Section title").with_default("Meet the team"))
                .field(FieldSpec::repeater(
                    "members",
                    "Members",
                    vec![
                        FieldSpec::image("photo", "Photo"),
                        FieldSpec::short_text("name", "Name"),
                        FieldSpec::short_text("role", "Role"),
                        FieldSpec::url("linkedin", "LinkedIn"),
                    ],
                )),
        ),
        BlockTypeDefinition::new(BlockType::Faq, "FAQ", Category::Content)
            .describe("Frequently asked questions accordion")
            .field(FieldSpec::short_text("title", "Title").with_default("Frequently asked questions"))
            .field(
                FieldSpec::repeater(
                    "items",
                    "Questions",
                    vec![FieldSpec::short_text("question", "Question"), FieldSpec::rich_text("answer", "Answer")],
                )
                .with_default(vec![record([
                    ("question", Value::text("How long does a project take?")),
                    ("answer", Value::text("<p>Most projects launch within six weeks.</p>")),
                ])]),
            ),
        cta_fields(
            section_styles(
                BlockTypeDefinition::new(BlockType::CallToAction, "Call to Action", Category::Hero)
                    .describe("Short pitch with a prominent button")
                    .field(FieldSpec::short_text("title", "Title").with_default("Ready to start?"))
                    .field(FieldSpec::long_text("text", "Text").with_default("Talk to us about your next project."))
                    .style(StyleSpec::alignment("align", "Alignment").with_default("center")),
            ),
            "Contact us",
        ),
        BlockTypeDefinition::new(BlockType::ContactForm, "Contact Form", Category::Forms)
            .describe("Name, email, and message form that sends an enquiry")
            .field(FieldSpec::short_text("title", "Title").with_default("Get in touch"))
            .field(FieldSpec::short_text("submit_label", "Submit label").with_default("Send message"))
            .field(FieldSpec::boolean("show_phone", "Ask for phone number").with_default(false))
            .field(FieldSpec::short_text("success_message", "Success message").with_default("Thanks! We'll be in touch."))
            .style(StyleSpec::color("background", "Background"))
            .style(StyleSpec::border("border", "Border")),
        BlockTypeDefinition::new(BlockType::Divider, "Divider", Category::Layout)
            .describe("Horizontal rule or spacer between sections")
            .field(FieldSpec::select("variant", "Variant", ["line", "space", "dots"]).with_default("line"))
            .style(StyleSpec::spacing("height", "Height").with_default(32.0))
            .style(StyleSpec::color("color", "Color")),
        BlockTypeDefinition::new(BlockType::Footer, "Footer", Category::Layout)
            .describe("Site footer with copyright and social links")
            .field(FieldSpec::short_text("copyright", "Copyright").with_default("© Company. All rights reserved."))
            .field(FieldSpec::repeater(
                "social",
                "Social links",
                vec![FieldSpec::icon("icon", "Icon"), FieldSpec::url("href", "Link")],
            ))
            .style(StyleSpec::color("background", "Background"))
            .style(StyleSpec::color("text_color", "Text color")),
    ]
}
