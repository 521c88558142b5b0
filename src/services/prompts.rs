/// Instruction sent alongside the uploaded image to the vision model.
pub const VISION_PROMPT: &str = "Analyse the given image, and find out the food item present in it within 5 words and try to give out individual food items present if more than one are present.";

/// Formatting sample for the text model to imitate. Its values are
/// placeholders and never reach the parser.
pub const NUTRITION_FORMAT_EXAMPLE: &str = concat!(
    "Here is a general nutritional breakdown:\n",
    "    * Food Item: Cheescake\n",
    "    * Calories: 370-400\n",
    "    * Total Fat: 26-30g \n",
    "    * Cholesterol: 125mg\n",
    "    * Sodium: 300-350mg\n",
    "    * Carbohydrates: 30-35g (Sugars: 24-28g)\n",
    "    * Protein: 7-8g\n",
    "    * Other infomation:",
);

/// Builds the text-model prompt around the vision model's raw description.
pub fn build_nutrition_prompt(food_description: &str) -> String {
    format!(
        "Provide only the nutrition stats for {} in the following format: {}. \
         No additional information is needed and dont include any starting introductory sentence strictly.",
        food_description, NUTRITION_FORMAT_EXAMPLE
    )
}
