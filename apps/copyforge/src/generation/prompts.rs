// User-prompt templates for every content type.
// Replace `{product_name}` and `{product_description}` before sending.

use crate::generation::content_type::ContentType;

pub const FACEBOOK_AD_TEMPLATE: &str = r#"
Product: "{product_name}"
Description: {product_description}

---
**Task:** Generate 3 to 5 high-impact ad headlines.

**Rules:**
1.  **Format:** Your response must ONLY be a numbered list of the headlines.
2.  **Content:** Each headline must be attention-grabbing, under 40 characters, and focus on a clear benefit.
3.  **No Extras:** Do not include any explanations, commentary, titles, or any text other than the numbered list itself.

**Headlines:**
"#;

pub const INSTAGRAM_CAPTION_TEMPLATE: &str = r###"
Product Name: "{product_name}"
Product Description: "{product_description}"

---
**Task:** Generate a single, complete, ready-to-use Instagram caption.

**Rules:**
1.  **Output Format:** Your entire response MUST be ONLY the text for the caption. Do not include headers, titles like "## Option 1", or any other markdown formatting.
2.  **No Questions:** Do not ask any follow-up questions. Your output must be final.
3.  **Single Option:** Provide only ONE final caption, not multiple choices or variations.
4.  **Content Style:** The caption must be conversational, engaging, include relevant hashtags, and have a clear call-to-action.
5.  **Length:** Keep the caption between 50 and 150 words.

**Caption Text:**
"###;

pub const COLD_EMAIL_TEMPLATE: &str = r#"
Product: "{product_name}"
Description: {product_description}

---
**Task:** Write a single, complete cold outreach email that is ready to send.

**Rules:**
1.  **Format:** Your response must ONLY contain the subject and body, structured exactly like this, including the blank lines for spacing:
    Subject: [Your Subject Here]
    Body:
    [Greeting, e.g., Hi [Name],]

    [Main body paragraph 1: Address the recipient's pain point and introduce the product as a solution.]

    [Main body paragraph 2: Clearly state the value proposition and include a single, clear call-to-action.]

    [Closing, e.g., Best regards,]
    [Your Name or Brand Name]
2.  **Content:** The email must be professional, personalized, and compelling.
3.  **Length:** The email body must be under 150 words.
4.  **No Extras:** Do not include any options, questions, explanations, or any text outside the specified Subject/Body format.

**Email:**
"#;

pub const LANDING_PAGE_TEMPLATE: &str = r#"
Product: "{product_name}"
Description: {product_description}

---
**Task:** Write the copy for a complete landing page hero section.

**Rules:**
1.  **Structure:** Use markdown headers (`###`) for each section title. The required sections are: Headline, Subheadline, Key Benefits, Social Proof, Call to Action, and Urgency Element.
2.  **Content:** For the "Key Benefits" section, you must use a bulleted list.
3.  **Output:** Deliver ONLY the requested content formatted with markdown. Do not write any introductions, explanations, or any text outside of the defined structure.

**Landing Page Copy:**
"#;

/// Brand kit template. The `###` headers carry the keywords the brand kit parser
/// anchors on: THEME, AUDIENCE, COLOR, VOICE, TAGLINE, MARKETING.
pub const BRAND_KIT_TEMPLATE: &str = r#"
Product Name: "{product_name}"
Description: "{product_description}"

---
**Task:** Create a comprehensive brand kit. Replace all content inside [square brackets] with your generated response.

**Rules:**
1.  **Format:** You must follow the specified structure precisely, using markdown headers (`###`) for main sections and bolded sub-headers (`**Sub-header:**`) for list items.
2.  **Completeness:** You must fill out every single requested section. Do not skip any.
3.  **Output:** Your entire response must be ONLY the brand kit content. Avoid all introductory text, explanations, or conversational filler.

**Brand Kit:**

### 🎨 BRAND THEME & MOOD
- **Keywords:** [Provide 5-7 descriptive keywords as a comma-separated list]
- **Visual Style:** [Describe the visual direction in one sentence]
- **Personality:** [List 3-4 key brand personality traits as a comma-separated list]

### 🎯 TARGET AUDIENCE
- **Demographic:** [Describe the primary audience]
- **Pain Points:** [List 2-3 primary pain points of the audience]
- **Hangouts:** [List 3-4 key places the audience can be found online/offline]

### 🎨 COLOR PALETTE
- **Primary:** [Hex code and a name/description]
- **Secondary:** [Hex code and a name/description]
- **Accent:** [Hex code and a name/description]
- **Neutrals:** [Provide 2 hex codes for neutral colors]
- **Psychology:** [Briefly explain the psychology of the primary color choice in one sentence]

### 🧾 BRAND VOICE & TONE
- **Style:** [Describe the communication style in 3-4 keywords]
- **Pillars:** [List 2-3 key messaging pillars]
- **Vocabulary to Use:** [Provide 5-7 powerful words to use]
- **Vocabulary to Avoid:** [Provide 5-7 words to avoid]

### 🗣️ TAGLINE SUGGESTIONS
- [Provide 3 distinct taglines, under 8 words each, on new lines]

### 📢 MARKETING STRATEGIES
- **Online:** [Provide 2-3 online marketing ideas]
- **Offline:** [Provide 2 offline marketing or partnership ideas]
"#;

/// Instruction sent alongside product images. The reply must be a single JSON object.
pub const IMAGE_ANALYSIS_INSTRUCTION: &str = r#"Analyze the following product images. Your task is to provide a concise marketing analysis.

Respond ONLY with a single, valid JSON object. Do not include any introductory text, explanations, or markdown formatting like ```json.

The JSON object must have the following structure:
- enhancedDescription: string (A compelling 2-3 sentence product description)
- keyFeatures: string[] (An array of key visual features)
- targetAudience: string (A description of the ideal customer)
- uniqueSellingPoints: string[] (An array of selling points visible in the images)"#;

pub fn template_for(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::FacebookAd => FACEBOOK_AD_TEMPLATE,
        ContentType::InstagramCaption => INSTAGRAM_CAPTION_TEMPLATE,
        ContentType::ColdEmail => COLD_EMAIL_TEMPLATE,
        ContentType::LandingPage => LANDING_PAGE_TEMPLATE,
        ContentType::BrandKit => BRAND_KIT_TEMPLATE,
    }
}

/// Fills the template for `content_type` with the product inputs.
pub fn format_prompt(
    product_name: &str,
    product_description: &str,
    content_type: ContentType,
) -> String {
    template_for(content_type)
        .replace("{product_name}", product_name)
        .replace("{product_description}", product_description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_name_and_description() {
        let prompt = format_prompt("Glow Lamp", "A lamp that glows", ContentType::FacebookAd);
        assert!(prompt.contains(r#"Product: "Glow Lamp""#));
        assert!(prompt.contains("Description: A lamp that glows"));
        assert!(!prompt.contains("{product_name}"));
        assert!(!prompt.contains("{product_description}"));
    }

    #[test]
    fn test_each_content_type_gets_its_own_template() {
        let ad = format_prompt("X", "Y", ContentType::FacebookAd);
        let caption = format_prompt("X", "Y", ContentType::InstagramCaption);
        let email = format_prompt("X", "Y", ContentType::ColdEmail);
        let landing = format_prompt("X", "Y", ContentType::LandingPage);
        assert!(ad.contains("ad headlines"));
        assert!(caption.contains("Instagram caption"));
        assert!(email.contains("Subject:"));
        assert!(landing.contains("Urgency Element"));
    }

    #[test]
    fn test_instagram_template_keeps_quoted_markdown_header() {
        assert!(INSTAGRAM_CAPTION_TEMPLATE.contains("titles like \"## Option 1\", or any other"));
        assert!(INSTAGRAM_CAPTION_TEMPLATE.contains("{product_name}"));
        assert!(INSTAGRAM_CAPTION_TEMPLATE.trim_end().ends_with("**Caption Text:**"));
    }

    #[test]
    fn test_unknown_key_uses_facebook_template() {
        let prompt = format_prompt("X", "Y", ContentType::from_key_or_default("carrier-pigeon"));
        assert_eq!(prompt, format_prompt("X", "Y", ContentType::FacebookAd));
    }

    #[test]
    fn test_brand_kit_template_names_every_parsed_section() {
        let prompt = format_prompt("X", "Y", ContentType::BrandKit);
        for keyword in ["THEME", "AUDIENCE", "COLOR", "VOICE", "TAGLINE", "MARKETING"] {
            assert!(
                prompt.lines().any(|l| l.starts_with("###") && l.contains(keyword)),
                "missing ### header for {keyword}"
            );
        }
    }
}
