pub const QUESTION_GENERATOR_SYSTEM_PROMPT: &str = "你是一位专业的亲子教育专家，擅长创建高质量的教育测试题目。请严格按照要求的JSON格式返回，不要添加任何其他文字。";

// Placeholders: {style} {count} {topic} {difficulty_zh} {difficulty} {reference}
pub const QUESTION_GENERATOR_USER_TEMPLATE: &str = "作为专业的{style}专家，请生成{count}道关于\"{topic}\"的{difficulty_zh}难度的选择题。
{reference}
要求：
1. 每题有4个选项（A、B、C、D）
2. 只有一个正确答案
3. 提供详细的解释说明
4. 内容要符合中国家庭教育实际情况
5. 语言通俗易懂，贴近生活

请按照以下JSON格式返回，确保是有效的JSON数组：
[
  {
    \"title\": \"题目内容\",
    \"options\": [\"选项A\", \"选项B\", \"选项C\", \"选项D\"],
    \"correct_answer\": 0,
    \"explanation\": \"详细解释为什么这个答案是正确的\",
    \"topic\": \"{topic}\",
    \"difficulty\": \"{difficulty}\",
    \"source\": \"AI生成\"
  }
]";

pub const REFERENCE_BOOK_LINE: &str = "请结合参考书目（编号：{reference_book_id}）中的观点出题。\n";
