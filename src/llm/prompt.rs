use crate::mail::{non_empty, GenerationRequest};

/// Renders the instruction prompt for a reply. Same request, same bytes.
pub fn build_prompt(request: &GenerationRequest) -> String {
	let mut prompt = String::from("Generate a professional email reply with the following requirements:\n");
	prompt.push_str("- Do not generate a subject line\n");
	prompt.push_str("- Format the email properly with paragraphs\n");

	if let Some(tone) = non_empty(&request.tone) {
		prompt.push_str(&format!("- Use a {tone} tone\n"));
	}
	if let Some(words) = request.desired_length {
		prompt.push_str(&format!("- Keep the email around {words} words\n"));
	}
	if let Some(recipient) = non_empty(&request.recipient_name) {
		prompt.push_str(&format!("- Address the recipient as {recipient}\n"));
	}
	if let Some(sender) = non_empty(&request.sender_name) {
		prompt.push_str(&format!("- Sign the email as {sender}\n"));
	}

	match request.formal_greeting {
		true => prompt.push_str("- Use a formal greeting (e.g., 'Dear [Name]')\n"),
		false => prompt.push_str("- Use a casual greeting (e.g., 'Hi [Name]')\n"),
	}

	prompt.push_str("\nOriginal email content to reply to:\n");
	prompt.push_str(&request.content);
	prompt
}
