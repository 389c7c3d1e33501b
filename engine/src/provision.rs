use anyhow::{Context, Result};

use blueprint_common::blueprints::{Blueprint, BlueprintKind};
use blueprint_common::fields::{FieldDefinition, FieldOption, FieldType, FieldValidation};
use blueprint_common::{BlueprintName, BlueprintStore, FieldName, Label};

/// Installs the built-in blueprints into the store. Idempotent: a
/// blueprint already present under the same name is left untouched, so
/// running this against a populated store never clobbers edits.
pub fn provision_system_blueprints(store: &BlueprintStore) -> Result<usize> {
    let blueprints = [
        asset()?,
        navigation()?,
        footer()?,
        hero_banner()?,
        image_gallery()?,
        rich_text()?,
        testimonials()?,
        cta_section()?,
        video_embed()?,
        faq_section()?,
        form()?,
    ];

    let count = blueprints.len();
    for blueprint in blueprints {
        tracing::debug!(name = %blueprint.name, "provisioning blueprint");
        store.upsert(blueprint)?;
    }
    tracing::info!(count, "provisioned built-in blueprints");
    Ok(count)
}

pub fn asset() -> Result<Blueprint> {
    let mut file = field("file", "File", "ملف", FieldType::File)?;
    file.required = true;

    let mut alt = field("alt", "Alt Text", "نص بديل", FieldType::Text)?;
    alt.bilingual = true;
    alt.help_text = Some(Label::bilingual(
        "Describe the image for accessibility",
        "وصف الصورة لإمكانية الوصول",
    ));

    let mut caption = field("caption", "Caption", "تعليق", FieldType::Textarea)?;
    caption.bilingual = true;

    blueprint(
        "Asset",
        BlueprintKind::Component,
        "Media Asset",
        "System blueprint for media files (images, videos, documents)",
        true,
        true,
        "file",
        "media",
        vec![file, alt, caption],
    )
}

pub fn navigation() -> Result<Blueprint> {
    let mut label = field("label", "Label", "التسمية", FieldType::Text)?;
    label.bilingual = true;
    label.required = true;

    let mut url = field("url", "URL", "الرابط", FieldType::Text)?;
    url.required = true;

    let mut icon = field("icon", "Icon", "أيقونة", FieldType::Text)?;
    icon.help_text = Some(Label::bilingual("Lucide icon name", "اسم أيقونة Lucide"));

    let mut open_in_new_tab = field(
        "openInNewTab",
        "Open in New Tab",
        "فتح في علامة تبويب جديدة",
        FieldType::Boolean,
    )?;
    open_in_new_tab.default_value = Some(serde_json::Value::Bool(false));

    let mut items = field("items", "Navigation Items", "عناصر التنقل", FieldType::Repeater)?;
    items.fields = vec![label, url, icon, open_in_new_tab];

    blueprint(
        "Navigation",
        BlueprintKind::Document,
        "Site Navigation",
        "System blueprint for site navigation menu",
        false, // only one navigation
        true,
        "menu",
        "layout",
        vec![items],
    )
}

pub fn footer() -> Result<Blueprint> {
    let mut title = field("title", "Column Title", "عنوان العمود", FieldType::Text)?;
    title.bilingual = true;

    let mut link_label = field("label", "Label", "التسمية", FieldType::Text)?;
    link_label.bilingual = true;
    let link_url = field("url", "URL", "الرابط", FieldType::Text)?;

    let mut links = field("links", "Links", "روابط", FieldType::Repeater)?;
    links.fields = vec![link_label, link_url];

    let mut columns = field("columns", "Footer Columns", "أعمدة التذييل", FieldType::Repeater)?;
    columns.fields = vec![title, links];

    let mut copyright = field("copyright", "Copyright Text", "نص حقوق النشر", FieldType::Text)?;
    copyright.bilingual = true;

    let mut social_links = field(
        "socialLinks",
        "Social Media Links",
        "روابط وسائل التواصل الاجتماعي",
        FieldType::Group,
    )?;
    social_links.fields = vec![
        field("facebook", "Facebook", "فيسبوك", FieldType::Text)?,
        field("instagram", "Instagram", "إنستغرام", FieldType::Text)?,
        field("twitter", "Twitter", "تويتر", FieldType::Text)?,
        field("linkedin", "LinkedIn", "لينكد إن", FieldType::Text)?,
        field("youtube", "YouTube", "يوتيوب", FieldType::Text)?,
    ];

    blueprint(
        "Footer",
        BlueprintKind::Document,
        "Site Footer",
        "System blueprint for site footer",
        false,
        true,
        "layout-footer",
        "layout",
        vec![columns, copyright, social_links],
    )
}

pub fn hero_banner() -> Result<Blueprint> {
    let mut heading = field("heading", "Heading", "العنوان", FieldType::Text)?;
    heading.bilingual = true;
    heading.required = true;
    heading.validation = Some(FieldValidation {
        max_length: Some(60),
        ..FieldValidation::default()
    });
    heading.help_text = Some(Label::bilingual(
        "Main heading (max 60 characters)",
        "العنوان الرئيسي (الحد الأقصى 60 حرفًا)",
    ));

    let mut subheading = field("subheading", "Subheading", "العنوان الفرعي", FieldType::Textarea)?;
    subheading.bilingual = true;
    subheading.validation = Some(FieldValidation {
        max_length: Some(200),
        ..FieldValidation::default()
    });

    let mut background_image = field(
        "backgroundImage",
        "Background Image",
        "صورة الخلفية",
        FieldType::Reference,
    )?;
    background_image.reference_type = Some(blueprint_name("Asset")?);
    background_image.required = true;

    let mut button_text = field("text", "Button Text", "نص الزر", FieldType::Text)?;
    button_text.bilingual = true;
    let link = field("link", "Link", "الرابط", FieldType::Text)?;
    let mut style = field("style", "Style", "النمط", FieldType::Select)?;
    style.options = options(&[
        ("primary", "Primary", "أساسي"),
        ("secondary", "Secondary", "ثانوي"),
        ("outline", "Outline", "محدد"),
    ]);
    style.default_value = Some(serde_json::json!("primary"));

    let mut cta_button = field(
        "ctaButton",
        "Call to Action Button",
        "زر الدعوة للعمل",
        FieldType::Group,
    )?;
    cta_button.fields = vec![button_text, link, style];

    let mut alignment = field("alignment", "Text Alignment", "محاذاة النص", FieldType::Radio)?;
    alignment.options = options(&[
        ("left", "Left", "يسار"),
        ("center", "Center", "وسط"),
        ("right", "Right", "يمين"),
    ]);
    alignment.default_value = Some(serde_json::json!("center"));

    blueprint(
        "HeroBanner",
        BlueprintKind::Component,
        "Hero Banner",
        "Large banner section with heading, subheading, image, and CTA",
        true,
        false,
        "image-plus",
        "layout",
        vec![heading, subheading, background_image, cta_button, alignment],
    )
}

pub fn image_gallery() -> Result<Blueprint> {
    let mut title = field("title", "Gallery Title", "عنوان المعرض", FieldType::Text)?;
    title.bilingual = true;

    let mut images = field("images", "Images", "الصور", FieldType::Gallery)?;
    images.required = true;
    images.validation = Some(FieldValidation {
        min: Some(1.0),
        max: Some(50.0),
        ..FieldValidation::default()
    });

    let mut layout = field("layout", "Layout", "التخطيط", FieldType::Select)?;
    layout.options = options(&[
        ("grid", "Grid", "شبكة"),
        ("masonry", "Masonry", "بناء"),
        ("carousel", "Carousel", "دوار"),
    ]);
    layout.default_value = Some(serde_json::json!("grid"));

    let mut columns = field("columns", "Columns", "الأعمدة", FieldType::Number)?;
    columns.validation = Some(FieldValidation {
        min: Some(1.0),
        max: Some(6.0),
        ..FieldValidation::default()
    });
    columns.default_value = Some(serde_json::json!(3));
    columns.help_text = Some(Label::bilingual("Number of columns (1-6)", "عدد الأعمدة (1-6)"));

    blueprint(
        "ImageGallery",
        BlueprintKind::Component,
        "Image Gallery",
        "Responsive image gallery with multiple layout options",
        true,
        false,
        "gallery-horizontal",
        "media",
        vec![title, images, layout, columns],
    )
}

pub fn rich_text() -> Result<Blueprint> {
    let mut content = field("content", "Content", "المحتوى", FieldType::RichText)?;
    content.bilingual = true;
    content.required = true;

    let mut alignment = field("alignment", "Text Alignment", "محاذاة النص", FieldType::Radio)?;
    alignment.options = options(&[
        ("left", "Left", "يسار"),
        ("center", "Center", "وسط"),
        ("right", "Right", "يمين"),
        ("justify", "Justify", "ضبط"),
    ]);
    alignment.default_value = Some(serde_json::json!("left"));

    blueprint(
        "RichText",
        BlueprintKind::Component,
        "Rich Text",
        "WYSIWYG text editor with formatting options",
        true,
        false,
        "file-text",
        "content",
        vec![content, alignment],
    )
}

pub fn testimonials() -> Result<Blueprint> {
    let mut title = field("title", "Section Title", "عنوان القسم", FieldType::Text)?;
    title.bilingual = true;

    let mut name = field("name", "Name", "الاسم", FieldType::Text)?;
    name.required = true;

    let mut role = field("role", "Role/Company", "الدور/الشركة", FieldType::Text)?;
    role.bilingual = true;

    let mut comment = field("comment", "Testimonial", "الشهادة", FieldType::Textarea)?;
    comment.bilingual = true;
    comment.required = true;

    let mut rating = field("rating", "Rating", "التقييم", FieldType::Number)?;
    rating.validation = Some(FieldValidation {
        min: Some(1.0),
        max: Some(5.0),
        ..FieldValidation::default()
    });
    rating.default_value = Some(serde_json::json!(5));

    let mut image = field("image", "Photo", "الصورة", FieldType::Reference)?;
    image.reference_type = Some(blueprint_name("Asset")?);

    let mut items = field("items", "Testimonials", "الشهادات", FieldType::Repeater)?;
    items.validation = Some(FieldValidation {
        min: Some(1.0),
        max: Some(20.0),
        ..FieldValidation::default()
    });
    items.fields = vec![name, role, comment, rating, image];

    blueprint(
        "Testimonials",
        BlueprintKind::Component,
        "Testimonials",
        "Customer testimonials slider",
        true,
        false,
        "quote",
        "content",
        vec![title, items],
    )
}

pub fn cta_section() -> Result<Blueprint> {
    let mut heading = field("heading", "Heading", "العنوان", FieldType::Text)?;
    heading.bilingual = true;
    heading.required = true;

    let mut description = field("description", "Description", "الوصف", FieldType::Textarea)?;
    description.bilingual = true;

    let mut primary_text = field("text", "Button Text", "نص الزر", FieldType::Text)?;
    primary_text.bilingual = true;
    primary_text.required = true;
    let mut primary_link = field("link", "Link", "الرابط", FieldType::Text)?;
    primary_link.required = true;

    let mut primary_button = field("primaryButton", "Primary Button", "الزر الأساسي", FieldType::Group)?;
    primary_button.fields = vec![primary_text, primary_link];

    let mut secondary_text = field("text", "Button Text", "نص الزر", FieldType::Text)?;
    secondary_text.bilingual = true;
    let secondary_link = field("link", "Link", "الرابط", FieldType::Text)?;

    let mut secondary_button = field(
        "secondaryButton",
        "Secondary Button (Optional)",
        "الزر الثانوي (اختياري)",
        FieldType::Group,
    )?;
    secondary_button.fields = vec![secondary_text, secondary_link];

    let mut background_color = field("backgroundColor", "Background Color", "لون الخلفية", FieldType::Select)?;
    background_color.options = options(&[
        ("primary", "Primary", "أساسي"),
        ("secondary", "Secondary", "ثانوي"),
        ("accent", "Accent", "تمييز"),
        ("transparent", "Transparent", "شفاف"),
    ]);
    background_color.default_value = Some(serde_json::json!("primary"));

    blueprint(
        "CTASection",
        BlueprintKind::Component,
        "Call to Action Section",
        "Prominent CTA section with heading, description, and button",
        true,
        false,
        "hand-pointing",
        "content",
        vec![heading, description, primary_button, secondary_button, background_color],
    )
}

pub fn video_embed() -> Result<Blueprint> {
    let mut title = field("title", "Video Title", "عنوان الفيديو", FieldType::Text)?;
    title.bilingual = true;

    let mut video_url = field("videoUrl", "Video URL", "رابط الفيديو", FieldType::Text)?;
    video_url.required = true;
    video_url.help_text = Some(Label::bilingual(
        "YouTube, Vimeo, or direct video URL",
        "YouTube أو Vimeo أو رابط فيديو مباشر",
    ));

    let mut thumbnail = field("thumbnail", "Custom Thumbnail", "صورة مصغرة مخصصة", FieldType::Reference)?;
    thumbnail.reference_type = Some(blueprint_name("Asset")?);
    thumbnail.help_text = Some(Label::bilingual(
        "Optional custom thumbnail (defaults to video platform thumbnail)",
        "صورة مصغرة مخصصة اختيارية",
    ));

    let mut aspect_ratio = field(
        "aspectRatio",
        "Aspect Ratio",
        "نسبة العرض إلى الارتفاع",
        FieldType::Select,
    )?;
    aspect_ratio.options = options(&[
        ("16:9", "16:9 (Widescreen)", "16:9 (عريض)"),
        ("4:3", "4:3 (Standard)", "4:3 (قياسي)"),
        ("1:1", "1:1 (Square)", "1:1 (مربع)"),
    ]);
    aspect_ratio.default_value = Some(serde_json::json!("16:9"));

    blueprint(
        "VideoEmbed",
        BlueprintKind::Component,
        "Video Embed",
        "Embed videos from YouTube, Vimeo, or other platforms",
        true,
        false,
        "video",
        "media",
        vec![title, video_url, thumbnail, aspect_ratio],
    )
}

pub fn faq_section() -> Result<Blueprint> {
    let mut title = field("title", "Section Title", "عنوان القسم", FieldType::Text)?;
    title.bilingual = true;

    let mut question = field("question", "Question", "السؤال", FieldType::Text)?;
    question.bilingual = true;
    question.required = true;

    let mut answer = field("answer", "Answer", "الجواب", FieldType::RichText)?;
    answer.bilingual = true;
    answer.required = true;

    let mut items = field("items", "FAQ Items", "عناصر الأسئلة الشائعة", FieldType::Repeater)?;
    items.validation = Some(FieldValidation {
        min: Some(1.0),
        max: Some(30.0),
        ..FieldValidation::default()
    });
    items.fields = vec![question, answer];

    blueprint(
        "FAQSection",
        BlueprintKind::Component,
        "FAQ Section",
        "Frequently Asked Questions accordion",
        true,
        false,
        "help-circle",
        "content",
        vec![title, items],
    )
}

pub fn form() -> Result<Blueprint> {
    let mut form_name = field("formName", "Form Name", "اسم النموذج", FieldType::Text)?;
    form_name.bilingual = true;
    form_name.required = true;
    form_name.help_text = Some(Label::bilingual(
        "Internal name for this form",
        "الاسم الداخلي لهذا النموذج",
    ));

    let mut form_title = field("formTitle", "Form Title", "عنوان النموذج", FieldType::Text)?;
    form_title.bilingual = true;
    form_title.required = true;
    form_title.help_text = Some(Label::bilingual(
        "Displayed title on the form",
        "العنوان المعروض في النموذج",
    ));

    let mut form_description = field(
        "formDescription",
        "Form Description",
        "وصف النموذج",
        FieldType::Textarea,
    )?;
    form_description.bilingual = true;
    form_description.help_text = Some(Label::bilingual(
        "Optional description shown above the form",
        "وصف اختياري يظهر فوق النموذج",
    ));

    let mut submit_button_text = field(
        "submitButtonText",
        "Submit Button Text",
        "نص زر الإرسال",
        FieldType::Text,
    )?;
    submit_button_text.bilingual = true;
    submit_button_text.default_value = Some(serde_json::json!({ "en": "Submit", "ar": "إرسال" }));

    let mut success_message = field(
        "successMessage",
        "Success Message",
        "رسالة النجاح",
        FieldType::Textarea,
    )?;
    success_message.bilingual = true;
    success_message.default_value = Some(serde_json::json!({
        "en": "Thank you! Your submission has been received.",
        "ar": "شكراً! تم استلام طلبك."
    }));

    let mut item_type = field("itemType", "Item Type", "نوع العنصر", FieldType::Select)?;
    item_type.required = true;
    item_type.options = options(&[
        ("field", "Single Field", "حقل واحد"),
        ("group", "Field Group (Side by Side)", "مجموعة حقول (جنبًا إلى جنب)"),
    ]);
    item_type.default_value = Some(serde_json::json!("field"));
    item_type.help_text = Some(Label::bilingual(
        "Choose \"Field Group\" to place multiple fields side by side",
        "اختر \"مجموعة حقول\" لوضع عدة حقول جنبًا إلى جنب",
    ));

    let mut field_type = field("fieldType", "Field Type", "نوع الحقل", FieldType::Select)?;
    field_type.required = true;
    field_type.options = options(&[
        ("text", "Text Input", "إدخال نص"),
        ("email", "Email", "بريد إلكتروني"),
        ("phone", "Phone Number", "رقم الهاتف"),
        ("textarea", "Text Area", "منطقة نص"),
        ("number", "Number", "رقم"),
        ("select", "Dropdown", "قائمة منسدلة"),
        ("radio", "Radio Buttons", "أزرار راديو"),
        ("checkbox", "Checkbox", "خانة اختيار"),
        ("checkboxGroup", "Checkbox Group", "مجموعة خانات اختيار"),
        ("date", "Date Picker", "منتقي التاريخ"),
        ("file", "File Upload", "رفع ملف"),
    ]);
    field_type.help_text = Some(Label::bilingual(
        "Only applies when Item Type is \"Single Field\"",
        "ينطبق فقط عندما يكون نوع العنصر \"حقل واحد\"",
    ));

    let mut width = field("width", "Field Width", "عرض الحقل", FieldType::Select)?;
    width.options = options(&[
        ("full", "Full Width", "عرض كامل"),
        ("half", "Half Width", "نصف العرض"),
        ("third", "One Third", "ثلث العرض"),
    ]);
    width.default_value = Some(serde_json::json!("full"));
    width.help_text = Some(Label::bilingual(
        "Only applies when Item Type is \"Single Field\"",
        "ينطبق فقط عندما يكون نوع العنصر \"حقل واحد\"",
    ));

    let mut group_field_type = field("fieldType", "Field Type", "نوع الحقل", FieldType::Select)?;
    group_field_type.required = true;
    group_field_type.options = options(&[
        ("text", "Text Input", "إدخال نص"),
        ("email", "Email", "بريد إلكتروني"),
        ("phone", "Phone Number", "رقم الهاتف"),
        ("number", "Number", "رقم"),
        ("select", "Dropdown", "قائمة منسدلة"),
        ("date", "Date Picker", "منتقي التاريخ"),
    ]);

    let mut group_fields = field(
        "groupFields",
        "Group Fields",
        "حقول المجموعة",
        FieldType::Repeater,
    )?;
    group_fields.validation = Some(FieldValidation {
        min: Some(2.0),
        max: Some(6.0),
        ..FieldValidation::default()
    });
    group_fields.help_text = Some(Label::bilingual(
        "Only applies when Item Type is \"Field Group\". Add 2-6 fields to display side by side.",
        "ينطبق فقط عندما يكون نوع العنصر \"مجموعة حقول\". أضف 2-6 حقول للعرض جنبًا إلى جنب.",
    ));
    group_fields.fields = vec![
        group_field_type,
        form_field_label()?,
        form_field_name()?,
        form_placeholder()?,
        form_required_flag()?,
        form_validation_rules(false)?,
        form_options_list("Options (for select)", "الخيارات (للقائمة)", "Only for select fields", "فقط لحقول القائمة")?,
    ];

    let mut help_text = field("helpText", "Help Text", "نص المساعدة", FieldType::Text)?;
    help_text.bilingual = true;

    let mut fields = field("fields", "Form Fields", "حقول النموذج", FieldType::Repeater)?;
    fields.required = true;
    fields.validation = Some(FieldValidation {
        min: Some(1.0),
        max: Some(50.0),
        ..FieldValidation::default()
    });
    fields.help_text = Some(Label::bilingual(
        "Add and configure form fields or field groups",
        "إضافة وتكوين حقول النموذج أو مجموعات الحقول",
    ));
    fields.fields = vec![
        item_type,
        field_type,
        form_field_label()?,
        form_field_name()?,
        form_placeholder()?,
        help_text,
        form_required_flag()?,
        form_validation_rules(true)?,
        form_options_list(
            "Options (for select/radio/checkbox)",
            "الخيارات (للقائمة/راديو/خانة)",
            "Only for select, radio, and checkbox group fields",
            "فقط لحقول القائمة وراديو ومجموعة خانات الاختيار",
        )?,
        width,
        group_fields,
    ];

    let mut enabled = field(
        "enabled",
        "Enable Email Notifications",
        "تفعيل إشعارات البريد الإلكتروني",
        FieldType::Boolean,
    )?;
    enabled.default_value = Some(serde_json::Value::Bool(true));

    let mut recipients = field(
        "recipients",
        "Recipient Emails",
        "بريد المستلمين الإلكتروني",
        FieldType::Text,
    )?;
    recipients.help_text = Some(Label::bilingual(
        "Comma-separated email addresses",
        "عناوين البريد الإلكتروني مفصولة بفواصل",
    ));

    let mut subject = field("subject", "Email Subject", "موضوع البريد الإلكتروني", FieldType::Text)?;
    subject.bilingual = true;
    subject.default_value = Some(serde_json::json!({
        "en": "New Form Submission",
        "ar": "تقديم نموذج جديد"
    }));

    let mut notifications = field(
        "notifications",
        "Email Notifications",
        "إشعارات البريد الإلكتروني",
        FieldType::Group,
    )?;
    notifications.fields = vec![enabled, recipients, subject];

    let mut enable_captcha = field("enableCaptcha", "Enable CAPTCHA", "تفعيل CAPTCHA", FieldType::Boolean)?;
    enable_captcha.default_value = Some(serde_json::Value::Bool(false));

    let mut redirect_url = field(
        "redirectUrl",
        "Redirect URL (after submission)",
        "رابط إعادة التوجيه (بعد الإرسال)",
        FieldType::Text,
    )?;
    redirect_url.help_text = Some(Label::bilingual(
        "Optional: redirect to a custom page after successful submission",
        "اختياري: إعادة التوجيه إلى صفحة مخصصة بعد الإرسال الناجح",
    ));

    let mut allow_multiple_submissions = field(
        "allowMultipleSubmissions",
        "Allow Multiple Submissions",
        "السماح بتقديمات متعددة",
        FieldType::Boolean,
    )?;
    allow_multiple_submissions.default_value = Some(serde_json::Value::Bool(true));

    let mut settings = field("settings", "Form Settings", "إعدادات النموذج", FieldType::Group)?;
    settings.fields = vec![enable_captcha, redirect_url, allow_multiple_submissions];

    blueprint(
        "Form",
        BlueprintKind::Document,
        "Dynamic Form",
        "Create custom forms with dynamic fields (contact, inquiry, registration, etc.)",
        true,
        false,
        "form-input",
        "content",
        vec![
            form_name,
            form_title,
            form_description,
            submit_button_text,
            success_message,
            fields,
            notifications,
            settings,
        ],
    )
}

// form sub-definitions shared between the top-level field list and the
// side-by-side group items

fn form_field_label() -> Result<FieldDefinition> {
    let mut f = field("fieldLabel", "Field Label", "تسمية الحقل", FieldType::Text)?;
    f.bilingual = true;
    f.required = true;
    Ok(f)
}

fn form_field_name() -> Result<FieldDefinition> {
    let mut f = field("fieldName", "Field Name (ID)", "اسم الحقل (المعرف)", FieldType::Text)?;
    f.required = true;
    f.help_text = Some(Label::bilingual(
        "Unique identifier (lowercase, no spaces)",
        "معرف فريد (أحرف صغيرة، بدون مسافات)",
    ));
    Ok(f)
}

fn form_placeholder() -> Result<FieldDefinition> {
    let mut f = field("placeholder", "Placeholder Text", "نص العنصر النائب", FieldType::Text)?;
    f.bilingual = true;
    Ok(f)
}

fn form_required_flag() -> Result<FieldDefinition> {
    let mut f = field("required", "Required Field", "حقل مطلوب", FieldType::Boolean)?;
    f.default_value = Some(serde_json::Value::Bool(false));
    Ok(f)
}

fn form_validation_rules(with_pattern: bool) -> Result<FieldDefinition> {
    let mut rules = vec![
        field("minLength", "Min Length", "الحد الأدنى للطول", FieldType::Number)?,
        field("maxLength", "Max Length", "الحد الأقصى للطول", FieldType::Number)?,
        field("min", "Min Value", "القيمة الدنيا", FieldType::Number)?,
        field("max", "Max Value", "القيمة القصوى", FieldType::Number)?,
    ];
    if with_pattern {
        rules.push(field("pattern", "Regex Pattern", "نمط Regex", FieldType::Text)?);
    }

    let mut validation = field("validation", "Validation Rules", "قواعد التحقق", FieldType::Group)?;
    validation.fields = rules;
    Ok(validation)
}

fn form_options_list(en: &str, ar: &str, help_en: &str, help_ar: &str) -> Result<FieldDefinition> {
    let mut value = field("value", "Value", "القيمة", FieldType::Text)?;
    value.required = true;

    let mut label = field("label", "Label", "التسمية", FieldType::Text)?;
    label.bilingual = true;
    label.required = true;

    let mut f = field("options", en, ar, FieldType::Repeater)?;
    f.help_text = Some(Label::bilingual(help_en, help_ar));
    f.fields = vec![value, label];
    Ok(f)
}

// construction helpers

fn field(name: &str, en: &str, ar: &str, field_type: FieldType) -> Result<FieldDefinition> {
    let name = FieldName::try_new(name).with_context(|| format!("invalid field name '{name}'"))?;
    Ok(FieldDefinition::new(name, Label::bilingual(en, ar), field_type))
}

fn blueprint_name(name: &str) -> Result<BlueprintName> {
    BlueprintName::try_new(name).with_context(|| format!("invalid blueprint name '{name}'"))
}

fn options(choices: &[(&str, &str, &str)]) -> Vec<FieldOption> {
    choices
        .iter()
        .map(|(value, en, ar)| FieldOption {
            value: (*value).to_string(),
            label: Label::bilingual(*en, *ar),
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn blueprint(
    name: &str,
    kind: BlueprintKind,
    display_name: &str,
    description: &str,
    allow_multiple: bool,
    is_system: bool,
    icon: &str,
    category: &str,
    fields: Vec<FieldDefinition>,
) -> Result<Blueprint> {
    let blueprint = Blueprint::new(
        blueprint_name(name)?,
        kind,
        display_name,
        Some(description.to_string()),
        allow_multiple,
        is_system,
        Some(icon.to_string()),
        Some(category.to_string()),
        fields,
    )
    .with_context(|| format!("in built-in blueprint '{name}'"))?;
    Ok(blueprint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_common::{Blueprints, Locale};

    #[test]
    fn provisioning_installs_every_built_in_blueprint() {
        let store = BlueprintStore::new();
        let count = provision_system_blueprints(&store).unwrap();
        assert_eq!(count, 11);
        assert_eq!(store.len(), 11);

        for name in ["Asset", "Navigation", "Footer", "HeroBanner", "FAQSection", "Form"] {
            let key = BlueprintName::try_new(name).unwrap();
            assert!(store.get(&key).is_some(), "missing blueprint '{name}'");
        }
    }

    #[test]
    fn provisioning_twice_leaves_existing_definitions_alone() {
        let store = BlueprintStore::new();
        provision_system_blueprints(&store).unwrap();

        let before = store.get(&BlueprintName::try_new("Footer").unwrap()).unwrap();
        provision_system_blueprints(&store).unwrap();
        let after = store.get(&BlueprintName::try_new("Footer").unwrap()).unwrap();

        assert_eq!(store.len(), 11);
        assert!(std::sync::Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn platform_blueprints_are_protected_and_navigation_is_singleton() {
        let asset = asset().unwrap();
        assert!(asset.is_system);
        assert_eq!(asset.kind, BlueprintKind::Component);

        let navigation = navigation().unwrap();
        assert!(navigation.is_system);
        assert!(!navigation.allow_multiple);
        assert!(navigation.accepts_instance_count(0));
        assert!(!navigation.accepts_instance_count(1));

        let banner = hero_banner().unwrap();
        assert!(!banner.is_system);
        assert!(banner.allow_multiple);
    }

    #[test]
    fn faq_items_carry_their_repeater_bounds() {
        let faq = faq_section().unwrap();
        let items = &faq.fields[1];
        let validation = items.validation.unwrap();
        assert_eq!(validation.min, Some(1.0));
        assert_eq!(validation.max, Some(30.0));
        assert_eq!(items.fields.len(), 2);
        assert!(items.fields.iter().all(|f| f.bilingual && f.required));
    }

    #[test]
    fn dynamic_form_carries_its_field_builder_tree() {
        let form = form().unwrap();
        assert_eq!(form.kind, BlueprintKind::Document);
        assert!(form.allow_multiple);
        assert!(!form.is_system);

        let fields = form
            .fields
            .iter()
            .find(|f| f.name.as_ref() == "fields")
            .unwrap();
        assert!(fields.required);
        let bounds = fields.validation.unwrap();
        assert_eq!(bounds.min, Some(1.0));
        assert_eq!(bounds.max, Some(50.0));

        let item_type = &fields.fields[0];
        assert_eq!(item_type.name.as_ref(), "itemType");
        assert_eq!(item_type.default_value, Some(serde_json::json!("field")));
        assert_eq!(item_type.options.len(), 2);

        // nested validation-rules group and the side-by-side group items
        assert!(fields.fields.iter().any(|f| f.name.as_ref() == "validation"));
        let group_fields = fields
            .fields
            .iter()
            .find(|f| f.name.as_ref() == "groupFields")
            .unwrap();
        let group_bounds = group_fields.validation.unwrap();
        assert_eq!(group_bounds.min, Some(2.0));
        assert_eq!(group_bounds.max, Some(6.0));

        let submit = form
            .fields
            .iter()
            .find(|f| f.name.as_ref() == "submitButtonText")
            .unwrap();
        assert_eq!(
            submit.default_value,
            Some(serde_json::json!({ "en": "Submit", "ar": "إرسال" }))
        );
    }

    #[test]
    fn labels_resolve_in_both_locales() {
        let hero = hero_banner().unwrap();
        let heading = &hero.fields[0];
        assert_eq!(heading.label.resolve(Locale::En), Some("Heading"));
        assert_eq!(heading.label.resolve(Locale::Ar), Some("العنوان"));
    }
}
