use robolang::{
    ast::{
        Action, ArithOp, Condition, Expression, Program, RelOp, Sensor, Statement, UnknownKeyword,
    },
    error::{ParseError, RoboError, RuntimeError},
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        lexer::{Token, tokenize},
        parser::{condition::parse_condition, expression::parse_expression},
    },
    parse,
    robot::{ActionResult, Halt, Robot, RobotCall, ScriptedRobot},
    run,
};

fn assert_success(src: &str) -> Program {
    parse(src).unwrap_or_else(|e| panic!("Script failed to parse: {e}"))
}

fn assert_failure(src: &str) -> ParseError {
    match parse(src) {
        Ok(program) => panic!("Script parsed but was expected to fail:\n{program}"),
        Err(e) => e,
    }
}

fn words(src: &str) -> Vec<String> {
    tokenize(src).unwrap()
                 .into_iter()
                 .map(|(tok, _)| tok.to_string())
                 .collect()
}

fn eval_expression(src: &str) -> EvalResult<i64> {
    let tokens = tokenize(src).unwrap();
    let mut iter = tokens.iter().peekable();
    let expr = parse_expression(&mut iter).unwrap();
    assert!(iter.next().is_none(), "trailing tokens after '{src}'");

    let mut robot = ScriptedRobot::new();
    Evaluator::new(&mut robot).eval_expression(&expr)
}

fn eval_condition(src: &str) -> bool {
    let tokens = tokenize(src).unwrap();
    let mut iter = tokens.iter().peekable();
    let condition = parse_condition(&mut iter).unwrap();

    let mut robot = ScriptedRobot::new();
    Evaluator::new(&mut robot).eval_condition(&condition).unwrap()
}

fn calls_of(src: &str, robot: ScriptedRobot) -> Vec<RobotCall> {
    let mut robot = robot;
    run(src, &mut robot).unwrap_or_else(|e| panic!("Script failed: {e}"));
    robot.calls().to_vec()
}

/// Reports `fuel` until `take_fuel` has been called `fuel` times, then 0.
struct DrainingTank {
    fuel:       i64,
    fuel_calls: usize,
}

impl Robot for DrainingTank {
    fn move_forward(&mut self, _: Option<i64>) -> ActionResult {
        Ok(())
    }

    fn turn_left(&mut self) -> ActionResult {
        Ok(())
    }

    fn turn_right(&mut self) -> ActionResult {
        Ok(())
    }

    fn turn_around(&mut self) -> ActionResult {
        Ok(())
    }

    fn set_shield(&mut self, _: bool) -> ActionResult {
        Ok(())
    }

    fn take_fuel(&mut self) -> ActionResult {
        self.fuel_calls += 1;
        self.fuel -= 1;
        Ok(())
    }

    fn idle_wait(&mut self, _: Option<i64>) -> ActionResult {
        Ok(())
    }

    fn fuel(&self) -> i64 {
        self.fuel
    }

    fn opponent_lr(&self) -> i64 {
        0
    }

    fn opponent_fb(&self) -> i64 {
        0
    }

    fn num_barrels(&self) -> i64 {
        0
    }

    fn closest_barrel_lr(&self) -> i64 {
        0
    }

    fn closest_barrel_fb(&self) -> i64 {
        0
    }

    fn distance_to_wall(&self) -> i64 {
        0
    }
}

/// A robot destroyed on its `destroyed_on`-th move.
struct FragileRobot {
    moves:        usize,
    destroyed_on: usize,
}

impl Robot for FragileRobot {
    fn move_forward(&mut self, _: Option<i64>) -> ActionResult {
        self.moves += 1;
        if self.moves == self.destroyed_on {
            return Err(Halt::new("robot destroyed"));
        }
        Ok(())
    }

    fn turn_left(&mut self) -> ActionResult {
        Ok(())
    }

    fn turn_right(&mut self) -> ActionResult {
        Ok(())
    }

    fn turn_around(&mut self) -> ActionResult {
        Ok(())
    }

    fn set_shield(&mut self, _: bool) -> ActionResult {
        Ok(())
    }

    fn take_fuel(&mut self) -> ActionResult {
        Ok(())
    }

    fn idle_wait(&mut self, _: Option<i64>) -> ActionResult {
        Ok(())
    }

    fn fuel(&self) -> i64 {
        1
    }

    fn opponent_lr(&self) -> i64 {
        0
    }

    fn opponent_fb(&self) -> i64 {
        0
    }

    fn num_barrels(&self) -> i64 {
        0
    }

    fn closest_barrel_lr(&self) -> i64 {
        0
    }

    fn closest_barrel_fb(&self) -> i64 {
        0
    }

    fn distance_to_wall(&self) -> i64 {
        0
    }
}

#[test]
fn delimiters_are_always_separate_tokens() {
    assert_eq!(words("move(1);"), ["move", "(", "1", ")", ";"]);
    assert_eq!(words("if(eq(1,2)){move;}"),
               ["if", "(", "eq", "(", "1", ",", "2", ")", ")", "{", "move", ";", "}"]);
    assert_eq!(words("  turnL ;\t\n turnR;"), ["turnL", ";", "turnR", ";"]);
    assert_eq!(words("sub(-3,x1y)"), ["sub", "(", "-3", ",", "x1y", ")"]);
    assert!(words(" \n\t ").is_empty());
}

#[test]
fn tokens_carry_line_numbers() {
    let tokens = tokenize("move;\n\nturnL\r\n;").unwrap();
    let lines: Vec<usize> = tokens.iter().map(|(_, line)| *line).collect();

    assert_eq!(lines, [1, 1, 3, 4]);
}

#[test]
fn integer_tokens() {
    assert_eq!(Token::Word("42".into()).as_integer(), Some(42));
    assert_eq!(Token::Word("-7".into()).as_integer(), Some(-7));
    assert_eq!(Token::Word("+7".into()).as_integer(), None);
    assert_eq!(Token::Word("-".into()).as_integer(), None);
    assert_eq!(Token::Word("4x".into()).as_integer(), None);
    assert_eq!(Token::Word("99999999999999999999".into()).as_integer(), None);
    assert_eq!(Token::LParen.as_integer(), None);
}

#[test]
fn every_statement_kind_parses() {
    assert_success("move;");
    assert_success("move(3);");
    assert_success("wait;");
    assert_success("wait(fuelLeft);");
    assert_success("turnL; turnR; turnAround; shieldOn; shieldOff; takeFuel;");
    assert_success("loop { move; }");
    assert_success("if (eq(1, 1)) { move; }");
    assert_success("if (eq(1, 1)) { move; } else { wait; }");
    assert_success("while (gt(fuelLeft, 0)) { takeFuel; }");
    assert_success("loop{if(and(lt(oppLR,1),or(gt(oppFB,2),not(eq(numBarrels,0))))){move(wallDist);}}");
}

#[test]
fn action_operands_are_optional() {
    let program = assert_success("move; move(add(1, 2)); wait; wait(-4);");

    assert_eq!(program.statements(),
               [Statement::Action(Action::Move(None)),
                Statement::Action(Action::Move(Some(Expression::BinaryOp {
                    op:    ArithOp::Add,
                    left:  Box::new(Expression::Number(1)),
                    right: Box::new(Expression::Number(2)),
                }))),
                Statement::Action(Action::Wait(None)),
                Statement::Action(Action::Wait(Some(Expression::Number(-4))))]);
}

#[test]
fn missing_else_is_recorded_as_absent() {
    let program = assert_success("if (lt(barrelFB, 0)) { turnAround; }");
    let Statement::If(statement) = &program.statements()[0] else {
        panic!("expected an if statement");
    };

    assert!(statement.else_block.is_none());
    assert_eq!(statement.condition,
               Condition::Relational { op:    RelOp::Lt,
                                       left:  Expression::Sensor(Sensor::BarrelFB),
                                       right: Expression::Number(0), });

    let program = assert_success("if (lt(barrelFB, 0)) { turnAround; } else { move; }");
    let Statement::If(statement) = &program.statements()[0] else {
        panic!("expected an if statement");
    };
    assert_eq!(statement.else_block.as_ref().map(|b| b.statements().len()), Some(1));
}

#[test]
fn empty_programs_and_blocks_are_rejected() {
    assert_eq!(assert_failure("").message, "Program has no statements");
    assert_eq!(assert_failure("   \n ").message, "Program has no statements");
    assert_eq!(assert_failure("loop{}").message, "Cannot have empty block");
    assert_eq!(assert_failure("while (eq(1, 1)) { }").message, "Cannot have empty block");
    assert_eq!(assert_failure("if (eq(1, 1)) { move; } else {}").message,
               "Cannot have empty block");
}

#[test]
fn missing_semicolon_reports_context() {
    let err = assert_failure("move move;");

    assert_eq!(err.message, "Missing ';'");
    assert_eq!(err.line, Some(1));
    assert_eq!(err.context, ["move", ";"]);
    assert!(err.to_string().contains("';'"));
    assert!(err.to_string().ends_with("@ ... move ;..."));
}

#[test]
fn context_is_limited_to_five_tokens() {
    let err = assert_failure("move turnL; turnR; turnAround; shieldOn;");

    assert_eq!(err.context, ["turnL", ";", "turnR", ";", "turnAround"]);
}

#[test]
fn failure_at_end_of_input() {
    let err = assert_failure("move");

    assert_eq!(err.message, "Missing ';'");
    assert!(err.at_end_of_input());
    assert!(err.context.is_empty());

    assert_eq!(assert_failure("loop { move;").message, "Missing '}'");
    assert_eq!(assert_failure("if (eq(1, 1)").message, "Missing ')'");

    let err = assert_failure("move;\nturnL");
    assert_eq!(err.line, None);
    assert_eq!(err.to_string(), "Missing ';' at end of input\n   @ ......");
}

#[test]
fn else_accepts_single_and_double_braces() {
    let single = assert_success("if(eq(1,2)){move;}else{turnL;}");
    let double = assert_success("if(eq(1,2)){move;}else{{turnL;}}");
    let spaced = assert_success("if (eq(1, 2)) { move; } else {\n    { turnL; turnR; }\n}");

    assert_eq!(single, double);
    assert_eq!(calls_of("if(eq(1,2)){move;}else{{turnL;}}", ScriptedRobot::new()),
               [RobotCall::TurnLeft]);
    let Statement::If(statement) = &spaced.statements()[0] else {
        panic!("expected an if statement");
    };
    assert_eq!(statement.else_block.as_ref().map(|b| b.statements().len()), Some(2));

    assert_eq!(assert_failure("if(eq(1,2)){move;}else{{turnL;}").message, "Missing '}'");
    assert_eq!(assert_failure("if(eq(1,2)){move;}else{{turnL;} turnR;}").message,
               "Missing '}'");
    assert_eq!(assert_failure("if(eq(1,2)){move;}else{{}}").message, "Cannot have empty block");
}

fn nested_additions(depth: usize) -> String {
    let mut src = String::from("move(");
    for _ in 0..depth {
        src.push_str("add(1, ");
    }
    src.push('0');
    src.push_str(&")".repeat(depth));
    src.push_str(");");
    src
}

#[test]
fn deep_nesting_is_rejected_before_parsing() {
    let limit = robolang::interpreter::parser::core::MAX_NESTING_DEPTH;

    let deepest = assert_success(&nested_additions(limit - 1));
    assert_eq!(parse(&deepest.to_string()).as_ref(), Ok(&deepest));
    let depth = i64::try_from(limit - 1).unwrap();
    assert_eq!(calls_of(&nested_additions(limit - 1), ScriptedRobot::new().with_fuel(1)),
               [RobotCall::Move(Some(depth))]);

    let err = assert_failure(&nested_additions(limit));
    assert_eq!(err.message, "Nesting is too deep");
    assert_eq!(err.line, Some(1));

    assert_eq!(assert_failure(&nested_additions(10_000)).message, "Nesting is too deep");
    let blocks = format!("{}move;{}", "loop {".repeat(5_000), "}".repeat(5_000));
    assert_eq!(assert_failure(&blocks).message, "Nesting is too deep");
}

#[test]
fn keywords_round_trip_through_their_enums() {
    for op in RelOp::ALL {
        assert_eq!(op.to_string().parse::<RelOp>(), Ok(*op));
    }
    for op in ArithOp::ALL {
        assert_eq!(op.keyword().parse::<ArithOp>(), Ok(*op));
    }
    for sensor in Sensor::ALL {
        assert_eq!(sensor.to_string().parse::<Sensor>(), Ok(*sensor));
        assert_success(&format!("wait({sensor});"));
    }

    assert_eq!(Sensor::ALL.len(), 7);
    assert_eq!("fuel".parse::<Sensor>(), Err(UnknownKeyword("fuel".into())));
    assert!("ADD".parse::<ArithOp>().is_err());
}

#[test]
fn structural_failures_have_specific_messages() {
    assert_eq!(assert_failure("jump;").message, "No actions can be found");
    assert_eq!(assert_failure("jump;").context, ["jump", ";"]);
    assert_eq!(assert_failure("move(speed);").message, "Unable to find SEN");
    assert_eq!(assert_failure("move(+5);").message, "Unable to find SEN");
    assert_eq!(assert_failure("if (le(1, 2)) { move; }").message, "Unable to find RELOP");
    assert_eq!(assert_failure("move(99999999999999999999);").message,
               "Number literal is too large");
    assert_eq!(assert_failure("move(add(1 2));").message, "Missing ','");
    assert_eq!(assert_failure("move(1;").message, "Missing ')'");
    assert_eq!(assert_failure("loop move;").message, "Missing '{'");
    assert_eq!(assert_failure("while eq(1, 1) { move; }").message, "Missing '('");
    assert_eq!(assert_failure("if (eq(1, 1)) { move; } else move;").message, "Missing '{'");
    assert_eq!(assert_failure("turnL; }").message, "No actions can be found");
}

#[test]
fn errors_report_the_offending_line() {
    let err = assert_failure("move;\nturnL;\nturnR\nwait;");

    assert_eq!(err.line, Some(4));
    assert!(err.to_string().starts_with("Missing ';' on line 4"));
}

#[test]
fn rendering_parses_back_to_the_same_tree() {
    let sources = ["move;",
                   "move(-3); wait(fuelLeft);",
                   "if(eq(1,2)){move;}else{turnL;}",
                   "loop { while (not(lt(wallDist, 3))) { move(div(wallDist, 2)); } turnR; }",
                   "if (or(and(eq(oppLR, 0), gt(oppFB, 0)), eq(numBarrels, 0))) { shieldOn; \
                    } else { if (gt(barrelLR, 0)) { turnR; } else { turnL; } }"];

    for src in sources {
        let program = assert_success(src);
        let rendered = program.to_string();
        let reparsed =
            parse(&rendered).unwrap_or_else(|e| panic!("rendering of {src} failed: {e}"));

        assert_eq!(program, reparsed, "rendered form:\n{rendered}");
    }
}

#[test]
fn rendering_layout() {
    let program = assert_success("if(eq(1,2)){move(2);}else{loop{turnL;}}takeFuel;");

    assert_eq!(program.to_string(),
               "if (eq(1, 2)) {\n    move(2);\n} else {\n    loop {\n        turnL;\n    }\n}\n\
                takeFuel;\n");
}

#[test]
fn relational_conditions() {
    assert!(eval_condition("eq(1,1)"));
    assert!(!eval_condition("lt(2,1)"));
    assert!(eval_condition("gt(2,1)"));
    assert!(!eval_condition("not(eq(1,1))"));
    assert!(!eval_condition("gt(1,1)"));
    assert!(eval_condition("lt(-5,-4)"));
}

#[test]
fn logical_conditions() {
    assert!(eval_condition("and(eq(1,1), gt(2,1))"));
    assert!(!eval_condition("and(eq(1,1), lt(2,1))"));
    assert!(eval_condition("or(lt(2,1), eq(3,3))"));
    assert!(!eval_condition("or(lt(2,1), eq(3,4))"));
    assert!(eval_condition("not(and(eq(1,2), eq(1,1)))"));
}

#[test]
fn arithmetic_expressions() {
    assert_eq!(eval_expression("add(mul(2,3), sub(10,4))"), Ok(12));
    assert_eq!(eval_expression("div(7,2)"), Ok(3));
    assert_eq!(eval_expression("div(-7,2)"), Ok(-3));
    assert_eq!(eval_expression("sub(0, 5)"), Ok(-5));
    assert_eq!(eval_expression("-12"), Ok(-12));
}

#[test]
fn arithmetic_failures() {
    assert_eq!(eval_expression("div(1,0)"), Err(RuntimeError::DivisionByZero { dividend: 1 }));
    assert!(matches!(eval_expression("mul(9223372036854775807, 2)"),
                     Err(RuntimeError::Overflow { .. })));
    assert!(matches!(eval_expression("div(-9223372036854775808, -1)"),
                     Err(RuntimeError::Overflow { .. })));
}

#[test]
fn sensors_are_read_from_the_robot() {
    let robot = ScriptedRobot::new().with_fuel(7)
                                    .with_opponent(-2, 5)
                                    .with_barrel(4, 4)
                                    .with_barrel(1, -1)
                                    .with_wall_distance(9);
    let evaluator_robot = &mut robot.clone();
    let evaluator = Evaluator::new(evaluator_robot);

    let read = |sensor| evaluator.read_sensor(sensor);
    assert_eq!(read(Sensor::FuelLeft), 7);
    assert_eq!(read(Sensor::OpponentLR), -2);
    assert_eq!(read(Sensor::OpponentFB), 5);
    assert_eq!(read(Sensor::NumBarrels), 2);
    assert_eq!(read(Sensor::BarrelLR), 1);
    assert_eq!(read(Sensor::BarrelFB), -1);
    assert_eq!(read(Sensor::WallDist), 9);

    assert_eq!(calls_of("if (eq(oppLR, -2)) { move(oppFB); }", robot),
               [RobotCall::Move(Some(5))]);
}

#[test]
fn while_runs_until_the_condition_fails() {
    let mut robot = DrainingTank { fuel:       4,
                                   fuel_calls: 0, };

    run("while(gt(fuelLeft,0)){takeFuel;}", &mut robot).unwrap();
    assert_eq!(robot.fuel_calls, 4);

    let mut empty = DrainingTank { fuel:       0,
                                   fuel_calls: 0, };
    run("while(gt(fuelLeft,0)){takeFuel;}", &mut empty).unwrap();
    assert_eq!(empty.fuel_calls, 0);
}

#[test]
fn if_runs_exactly_one_branch() {
    assert_eq!(calls_of("if(eq(1,2)){move;}else{turnL;}", ScriptedRobot::new()),
               [RobotCall::TurnLeft]);
    assert_eq!(calls_of("if(eq(1,1)){move;}else{turnL;}", ScriptedRobot::new().with_fuel(1)),
               [RobotCall::Move(None)]);
    assert_eq!(calls_of("if(eq(1,2)){move;} shieldOff;", ScriptedRobot::new()),
               [RobotCall::SetShield(false)]);
}

#[test]
fn actions_map_to_robot_calls() {
    let calls = calls_of("move(add(1, 2)); turnL; turnR; turnAround; shieldOn; shieldOff; \
                          takeFuel; wait; wait(mul(2, fuelLeft));",
                         ScriptedRobot::new().with_fuel(10));

    assert_eq!(calls,
               [RobotCall::Move(Some(3)),
                RobotCall::TurnLeft,
                RobotCall::TurnRight,
                RobotCall::TurnAround,
                RobotCall::SetShield(true),
                RobotCall::SetShield(false),
                RobotCall::TakeFuel,
                RobotCall::Wait(None),
                RobotCall::Wait(Some(14))]);
}

#[test]
fn failing_operand_skips_the_robot_call() {
    let mut robot = ScriptedRobot::new().with_fuel(10);

    let result = run("turnL; move(div(1, 0)); turnR;", &mut robot);

    assert_eq!(result, Err(RoboError::Runtime(RuntimeError::DivisionByZero { dividend: 1 })));
    assert_eq!(robot.calls(), [RobotCall::TurnLeft]);
}

#[test]
fn halt_propagates_out_of_loop() {
    let mut robot = FragileRobot { moves:        0,
                                   destroyed_on: 5, };

    let result = run("loop{ move; }", &mut robot);

    assert_eq!(robot.moves, 5);
    assert_eq!(result,
               Err(RoboError::Runtime(RuntimeError::Halted { reason: "robot destroyed".into() })));
}

#[test]
fn halt_propagates_out_of_nested_frames() {
    let mut robot = FragileRobot { moves:        0,
                                   destroyed_on: 3, };

    let result = run("loop { while (eq(1, 1)) { if (gt(fuelLeft, 0)) { move; turnL; } } }",
                     &mut robot);

    assert_eq!(robot.moves, 3);
    assert!(matches!(result, Err(RoboError::Runtime(RuntimeError::Halted { .. }))));
}

#[test]
fn program_is_reusable_after_a_failed_run() {
    let program = assert_success("turnL; loop { move; }");
    let before = program.clone();

    for _ in 0..2 {
        let mut robot = ScriptedRobot::new().with_fuel(3);
        let result = Evaluator::new(&mut robot).execute_program(&program);

        assert_eq!(result, Err(RuntimeError::Halted { reason: "out of fuel".into() }));
        assert_eq!(robot.calls().len(), 4);
    }
    assert_eq!(program, before);
}

#[test]
fn parse_errors_do_not_touch_the_robot() {
    let mut robot = ScriptedRobot::new().with_fuel(1);

    let result = run("move; turnL", &mut robot);

    assert!(matches!(result, Err(RoboError::Parse(_))));
    assert!(robot.calls().is_empty());
}
